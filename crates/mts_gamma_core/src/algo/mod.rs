pub(crate) mod field;
pub(crate) mod flow;
pub(crate) mod refine;
pub(crate) mod solver;
