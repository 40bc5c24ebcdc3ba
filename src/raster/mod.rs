pub(crate) mod composite;
pub(crate) mod draw;
pub(crate) mod pixmap;
