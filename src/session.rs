/// Session lifecycle states delivered by the coordination client.
///
/// Only `Connected` and `Lost` drive watch recovery; every other transition
/// is observed and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// A live session with the service
    Connected,

    /// Connectivity is degraded; the session may still be recovered without
    /// losing outstanding registrations
    Suspended,

    /// The session is gone. Outstanding watch registrations are not
    /// preserved across this transition.
    Lost,
}
