pub(crate) mod frame_loop;
pub(crate) mod pipeline;
pub(crate) mod snapshot;
