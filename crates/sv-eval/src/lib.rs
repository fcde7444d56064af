//! Constant-expression evaluation: a call stack of frames with local
//! storage, return-value plumbing, and call-stack diagnostic attachment.

pub mod context;
pub mod frame;
pub mod value;

pub use context::{EvalContext, EvalContractViolation};
pub use frame::{Frame, FrameId, SubroutineCall};
pub use value::{ConstantInteger, ConstantValue};
