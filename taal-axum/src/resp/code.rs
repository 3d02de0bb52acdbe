/// Business codes carried in the `code` field of every [`R`](super::r::R).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum Code {
    Ok = 200,
    NotFound = 404,
    InternalServerError = 500,
    MissingParam = 901,
    IllegalParam = 902,
    UnsupportedLanguage = 1001,
    MissingTranslation = 1002,
}

impl Code {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}
