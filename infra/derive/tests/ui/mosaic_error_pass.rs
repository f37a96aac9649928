use mosaic_derive::mosaic_error;
use std::borrow::Cow;

#[mosaic_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Duplicate `{module}`{}", format_context(.context))]
    Duplicate { module: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<(), DemoError> {
    Err(std::io::Error::other("disk")).context("reading module.json")?;
    Ok(())
}

fn main() {
    let err = read().unwrap_err();
    assert_eq!(err.to_string(), "IO error (reading module.json): disk");

    let err: Result<(), DemoError> =
        Err(DemoError::Duplicate { module: "blog".into(), context: None });
    assert!(err.context("dashboard").is_err());

    let internal: DemoError = "boom".into();
    assert!(matches!(internal, DemoError::Internal { .. }));
}
