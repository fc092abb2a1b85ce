//! Status returned by behavior nodes.

/// The result of evaluating a behavior node.
///
/// Every node completes within the tick that evaluates it: conditions answer
/// immediately and actions either happen or don't.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The condition held, or the action was carried out.
    Success,

    /// The condition did not hold, or the action could not be carried out.
    Failure,
}

impl Status {
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }

    #[inline]
    pub fn is_failure(self) -> bool {
        matches!(self, Status::Failure)
    }

    /// Success becomes Failure and vice versa.
    #[inline]
    pub fn invert(self) -> Self {
        match self {
            Status::Success => Status::Failure,
            Status::Failure => Status::Success,
        }
    }
}

impl From<bool> for Status {
    fn from(value: bool) -> Self {
        if value { Status::Success } else { Status::Failure }
    }
}
