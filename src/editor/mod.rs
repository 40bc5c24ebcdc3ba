pub(crate) mod controls;
pub(crate) mod input;
pub(crate) mod painter;
