//! Diagnostic code constants.
//!
//! Every condition the specification calls out as "warning only when `WARN`
//! is set" has a stable code here, so a caller can match on `Diagnostic::code`
//! without depending on the (possibly localized) message text.

/// A directive named a second role modifier (e.g. `{TL:...}`); the later one wins.
pub const DUPLICATE_ROLE: &str = "MX1001";
/// A directive contained a single-letter modifier the parser does not recognize.
pub const UNKNOWN_MODIFIER: &str = "MX1002";
/// `close_container`/`close_list`/`close_instance` called with an empty stack.
pub const CLOSE_WITHOUT_OPEN: &str = "MX1101";
/// The name passed to a close operation does not match the frame being popped.
pub const NAME_MISMATCH: &str = "MX1102";
/// A close operation's `LIST` expectation does not match the popped frame.
pub const LIST_MISMATCH: &str = "MX1103";
/// A close operation's `INSTANCE` expectation does not match the popped frame.
pub const INSTANCE_MISMATCH: &str = "MX1104";
/// An open operation would push past the handle's fixed stack depth.
pub const STACK_OVERFLOW: &str = "MX1105";
