//! Request slice: a fetchable value wrapped in an idle/loading/settled state
//! machine guarded by request tokens.

use serde::Serialize;

/// Lifecycle of a request slice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// Monotonic dispatch number, unique per slice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RequestToken(pub u64);

impl std::fmt::Display for RequestToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Input to [`AsyncResource::apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceEvent<T> {
    Pending(RequestToken),
    Fulfilled(RequestToken, T),
    Rejected(RequestToken, String),
}

impl<T> ResourceEvent<T> {
    pub fn token(&self) -> RequestToken {
        match self {
            Self::Pending(t) | Self::Fulfilled(t, _) | Self::Rejected(t, _) => *t,
        }
    }
}

/// Outcome of settling a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// The result was written into the slice.
    Committed,
    /// A newer request was dispatched; the result was dropped.
    Stale,
}

/// One fetchable resource and the last result committed for it.
///
/// A failed request leaves the previously committed `data` in place, so a
/// populated list stays readable next to the error message.
#[derive(Debug, Clone, PartialEq)]
pub struct AsyncResource<T> {
    status: Status,
    data: Option<T>,
    error: Option<String>,
    latest: RequestToken,
}

impl<T> Default for AsyncResource<T> {
    fn default() -> Self {
        Self {
            status: Status::Idle,
            data: None,
            error: None,
            latest: RequestToken(0),
        }
    }
}

impl<T> AsyncResource<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the next token and moves the slice to `Loading`.
    pub fn begin(&mut self) -> RequestToken {
        let token = RequestToken(self.latest.0 + 1);
        self.apply(ResourceEvent::Pending(token));
        token
    }

    /// Settles the request identified by `token`.
    pub fn settle(&mut self, token: RequestToken, result: Result<T, String>) -> Settlement {
        match result {
            Ok(data) => self.apply(ResourceEvent::Fulfilled(token, data)),
            Err(message) => self.apply(ResourceEvent::Rejected(token, message)),
        }
    }

    /// Transition function.
    ///
    /// `Pending` registers its token as the latest dispatch. A completion
    /// commits only when its token equals the latest dispatched token.
    pub fn apply(&mut self, event: ResourceEvent<T>) -> Settlement {
        let token = event.token();
        match event {
            ResourceEvent::Pending(_) => {
                if token <= self.latest {
                    return Settlement::Stale;
                }
                self.latest = token;
                self.status = Status::Loading;
                self.error = None;
                Settlement::Committed
            }
            ResourceEvent::Fulfilled(_, data) => {
                if token != self.latest || self.status != Status::Loading {
                    return Settlement::Stale;
                }
                self.data = Some(data);
                self.status = Status::Succeeded;
                Settlement::Committed
            }
            ResourceEvent::Rejected(_, message) => {
                if token != self.latest || self.status != Status::Loading {
                    return Settlement::Stale;
                }
                self.error = Some(message);
                self.status = Status::Failed;
                Settlement::Committed
            }
        }
    }

    /// Drops the error message, keeping status and data.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.status == Status::Loading
    }

    /// Token of the most recent dispatch; `#0` before the first one.
    pub fn latest_token(&self) -> RequestToken {
        self.latest
    }
}
