//! Run one full site build

use anyhow::Result;

use crate::clock::Clock;
use crate::generator::Generator;
use crate::Site;

/// Build the entire site once. Returns the number of published posts.
pub fn run(site: &Site, clock: &dyn Clock) -> Result<usize> {
    Generator::new(site, clock)?.build()
}
