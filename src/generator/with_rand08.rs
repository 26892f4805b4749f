//! Integration with `rand` (v0.8) crate.

use super::RandSource;
use crate::Error;
use rand::RngCore;

/// An adapter that implements [`RandSource`] for [`RngCore`] types.
///
/// The wrapped generator should be cryptographically secure, such as [`rand::rngs::OsRng`], the
/// default of [`Generator::builder`](crate::Generator::builder).
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Adapter<T>(/** The wrapped [`RngCore`] type. */ pub T);

impl<T: RngCore> RandSource for Adapter<T> {
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.0.try_fill_bytes(dest).map_err(Error::RandomSource)
    }
}
