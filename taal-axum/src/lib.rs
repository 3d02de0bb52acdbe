pub mod i18n;
pub use i18n::middleware::{LocaleState, RequestLocale};

pub mod page;
pub use page::{Component, Page};

pub mod resp;
pub use resp::{code::Code, err::E, r::R};

pub mod server;
pub use server::WebServer;
