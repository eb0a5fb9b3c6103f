pub(crate) mod backend;
pub(crate) mod capability;
pub(crate) mod native;
pub(crate) mod ops;
pub(crate) mod waveform;
