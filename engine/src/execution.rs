use rayon::prelude::*;

/// How a scan over words is scheduled. Both modes produce the same results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionPolicy {
    #[default]
    Sequential,
    Parallel,
}

impl ExecutionPolicy {
    pub(crate) fn for_each<T, F>(self, items: &[T], f: F)
    where
        T: Sync,
        F: Fn(&T) + Sync + Send,
    {
        match self {
            ExecutionPolicy::Sequential => items.iter().for_each(f),
            ExecutionPolicy::Parallel => items.par_iter().for_each(f),
        }
    }

    pub(crate) fn for_each_mut<T, F>(self, items: &mut [T], f: F)
    where
        T: Send,
        F: Fn(&mut T) + Sync + Send,
    {
        match self {
            ExecutionPolicy::Sequential => items.iter_mut().for_each(f),
            ExecutionPolicy::Parallel => items.par_iter_mut().for_each(f),
        }
    }

    pub(crate) fn any<T, F>(self, items: &[T], f: F) -> bool
    where
        T: Sync,
        F: Fn(&T) -> bool + Sync + Send,
    {
        match self {
            ExecutionPolicy::Sequential => items.iter().any(f),
            ExecutionPolicy::Parallel => items.par_iter().any(f),
        }
    }

    pub(crate) fn sort_by<T, F>(self, items: &mut [T], compare: F)
    where
        T: Send,
        F: Fn(&T, &T) -> std::cmp::Ordering + Sync,
    {
        match self {
            ExecutionPolicy::Sequential => items.sort_by(compare),
            ExecutionPolicy::Parallel => items.par_sort_by(compare),
        }
    }
}
