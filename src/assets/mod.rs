pub(crate) mod decode;
pub(crate) mod key;
pub(crate) mod sheet;
pub(crate) mod store;
