pub(crate) mod fractal;
