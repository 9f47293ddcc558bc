pub(crate) mod evaluator;
pub(crate) mod path_follow;
pub(crate) mod reveal;
pub(crate) mod sample;
