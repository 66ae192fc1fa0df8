//! Completion-callback adapter.
//!
//! Every operation is an `async fn` returning `Result<T, MarketplaceError>`.
//! [`CallbackExt`] lets the same future deliver its outcome to a
//! `(error, value)` callback instead, so both styles observe identical
//! results:
//!
//! ```rust,ignore
//! client
//!     .items()
//!     .get_an_item("SKU-1", &RequestOptions::default())
//!     .with_callback(|err, item| match (err, item) {
//!         (Some(err), _) => eprintln!("{err}"),
//!         (None, item) => println!("{item:?}"),
//!     })
//!     .await;
//! ```

use crate::error::MarketplaceError;
use std::future::Future;

/// The `(error, value)` pair handed to callbacks. Exactly one side is set.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion<T> {
    pub error: Option<MarketplaceError>,
    pub value: Option<T>,
}

impl<T> Completion<T> {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn into_parts(self) -> (Option<MarketplaceError>, Option<T>) {
        (self.error, self.value)
    }

    /// Back to a `Result`.
    pub fn into_result(self) -> Result<T, MarketplaceError> {
        match (self.error, self.value) {
            (Some(err), _) => Err(err),
            (None, Some(value)) => Ok(value),
            (None, None) => Err(MarketplaceError::ParseError(
                "completion carried neither an error nor a value".to_string(),
            )),
        }
    }
}

impl<T> From<Result<T, MarketplaceError>> for Completion<T> {
    fn from(result: Result<T, MarketplaceError>) -> Self {
        match result {
            Ok(value) => Self {
                error: None,
                value: Some(value),
            },
            Err(error) => Self {
                error: Some(error),
                value: None,
            },
        }
    }
}

/// Deliver a fallible future's outcome to a completion callback.
pub trait CallbackExt<T>: Future<Output = Result<T, MarketplaceError>> + Sized {
    /// Await the operation and invoke `callback` exactly once.
    fn with_callback<F>(self, callback: F) -> impl Future<Output = ()>
    where
        F: FnOnce(Option<MarketplaceError>, Option<T>),
    {
        async move {
            let (error, value) = Completion::from(self.await).into_parts();
            callback(error, value);
        }
    }

    /// Run the operation on the tokio runtime and invoke `callback` when done.
    fn spawn_with_callback<F>(self, callback: F) -> tokio::task::JoinHandle<()>
    where
        Self: Send + 'static,
        T: Send + 'static,
        F: FnOnce(Option<MarketplaceError>, Option<T>) + Send + 'static,
    {
        tokio::spawn(async move {
            let (error, value) = Completion::from(self.await).into_parts();
            callback(error, value);
        })
    }
}

impl<T, Fut> CallbackExt<T> for Fut where Fut: Future<Output = Result<T, MarketplaceError>> {}
