pub(crate) mod base64;
pub(crate) mod der;
