pub(crate) mod slot;
pub(crate) mod vibrator;
