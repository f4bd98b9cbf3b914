use search_engine::process_queries::{process_queries, process_queries_joined};
use search_engine::{DocId, Document, DocumentStatus, ExecutionPolicy, SearchServer};

const VOCABULARY: &[&str] = &[
    "amber", "birch", "cedar", "delta", "ember", "fjord", "glade", "heron", "inlet", "jasper", "kestrel",
    "lumen", "moss", "nectar", "onyx", "pine", "quartz", "raven", "sable", "thorn",
];

/// Small deterministic generator so the corpus is identical between runs.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: usize) -> usize {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        ((self.0 >> 33) % bound as u64) as usize
    }
}

fn corpus(size: DocId) -> SearchServer {
    let mut rng = Lcg(17);
    let mut server = SearchServer::from_stop_words_text("moss onyx").unwrap();
    let statuses = [DocumentStatus::Actual, DocumentStatus::Irrelevant, DocumentStatus::Banned];
    for id in 0..size {
        let len = 3 + rng.next(8);
        let text: Vec<&str> = (0..len).map(|_| VOCABULARY[rng.next(VOCABULARY.len())]).collect();
        let ratings: Vec<i32> = (0..rng.next(4)).map(|_| rng.next(20) as i32 - 5).collect();
        let status = statuses[rng.next(statuses.len())];
        server.add_document(id * 3, &text.join(" "), status, &ratings).unwrap();
    }
    server
}

fn assert_same_hits(seq: &[Document], par: &[Document]) {
    assert_eq!(seq.len(), par.len());
    for (a, b) in seq.iter().zip(par) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.rating, b.rating);
        assert!((a.relevance - b.relevance).abs() < 1e-12);
    }
}

const QUERIES: &[&str] = &[
    "amber cedar -thorn",
    "raven sable quartz pine",
    "kestrel -birch -glade heron",
    "lumen nectar moss",
    "delta ember fjord inlet jasper -amber",
];

#[test]
fn find_top_documents_same_under_both_policies() {
    let server = corpus(400);
    for query in QUERIES {
        let seq = server
            .find_top_documents_with_policy(ExecutionPolicy::Sequential, query, DocumentStatus::Actual.predicate())
            .unwrap();
        let par = server
            .find_top_documents_with_policy(ExecutionPolicy::Parallel, query, DocumentStatus::Actual.predicate())
            .unwrap();
        assert!(!seq.is_empty(), "{query}");
        assert_same_hits(&seq, &par);
        assert_same_hits(&seq, &server.find_top_documents(query).unwrap());

        let odd = |id: DocId, _: DocumentStatus, rating: i32| id % 2 == 1 && rating >= 0;
        assert_same_hits(
            &server.find_top_documents_with_policy(ExecutionPolicy::Sequential, query, odd).unwrap(),
            &server.find_top_documents_with_policy(ExecutionPolicy::Parallel, query, odd).unwrap(),
        );
    }
}

#[test]
fn match_document_same_under_both_policies() {
    let server = corpus(60);
    let query = "amber birch birch cedar heron -zzz amber raven";
    for id in server.document_ids() {
        let seq = server.match_document_with_policy(ExecutionPolicy::Sequential, query, id).unwrap();
        let par = server.match_document_with_policy(ExecutionPolicy::Parallel, query, id).unwrap();
        assert_eq!(seq, par);
        assert!(seq.words.windows(2).all(|w| w[0] < w[1]));
    }
    let vetoed = server.match_document_with_policy(ExecutionPolicy::Parallel, "amber -amber", 0).unwrap();
    assert!(vetoed.words.is_empty());
}

#[test]
fn remove_document_same_under_both_policies() {
    let mut seq = corpus(200);
    let mut par = corpus(200);
    for id in (0..600).step_by(7) {
        seq.remove_document_with_policy(ExecutionPolicy::Sequential, id);
        par.remove_document_with_policy(ExecutionPolicy::Parallel, id);
    }

    assert_eq!(seq.document_ids().collect::<Vec<_>>(), par.document_ids().collect::<Vec<_>>());
    for id in seq.document_ids() {
        assert_eq!(seq.word_frequencies(id), par.word_frequencies(id));
    }
    for query in QUERIES {
        assert_same_hits(&seq.find_top_documents(query).unwrap(), &par.find_top_documents(query).unwrap());
    }
}

#[test]
fn fan_out_matches_one_by_one() {
    let server = corpus(300);
    let batched = process_queries(&server, QUERIES).unwrap();
    assert_eq!(batched.len(), QUERIES.len());
    for (query, hits) in QUERIES.iter().zip(&batched) {
        assert_same_hits(&server.find_top_documents(query).unwrap(), hits);
    }
    let joined = process_queries_joined(&server, QUERIES).unwrap();
    assert_eq!(joined.len(), batched.iter().map(Vec::len).sum::<usize>());
}
