use crate::base::Real;

/// Specifies the creep-rate function of a single mechanism
///
/// A mechanism computes the equivalent creep strain rate from the net equivalent stress `q`
/// (shared by all mechanisms of a flow rule) and from its own accumulated equivalent creep
/// strain `γ = γ_old + x`. The flow rule performs the chain rule with respect to the unknowns.
///
/// Implementations must return finite values for any finite input, including `q = 0` and `γ = 0`.
pub trait CreepLaw<T: Real>: Send + Sync {
    /// Returns the name of the accumulated strain (internal value) of this mechanism
    fn name(&self) -> &'static str;

    /// Returns the equivalent creep strain rate
    fn rate(&self, q: T, gamma: T) -> T;

    /// Returns the derivative of the rate with respect to the net equivalent stress
    fn rate_dq(&self, q: T, gamma: T) -> T;

    /// Returns the derivative of the rate with respect to the accumulated strain
    fn rate_dgamma(&self, q: T, gamma: T) -> T;
}
