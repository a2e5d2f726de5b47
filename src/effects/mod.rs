pub(crate) mod composite;
pub(crate) mod overlay;
pub(crate) mod panel;
pub(crate) mod resize;
