pub(crate) mod precomputed;
pub(crate) mod randomrange;
