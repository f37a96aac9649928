use std::borrow::Cow;

#[mosaic_derive::mosaic_error]
pub enum ShopError {
    #[error("Invalid product{}: {message}", format_context(.context))]
    InvalidProduct { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("Internal shop error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
