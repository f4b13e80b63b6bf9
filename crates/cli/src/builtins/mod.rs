//! Sensors compiled into the `sensord` binary.

mod file;
mod heartbeat;
mod loadavg;
mod resusage;

use sensord_sensor::{ProviderCatalog, ProviderDescriptor};

/// Every built-in provider, in discovery order.
pub fn catalog() -> ProviderCatalog {
    ProviderCatalog::new()
        .with(heartbeat::descriptor())
        .with(resusage::descriptor())
        .with(loadavg::descriptor())
        .with(file::descriptor())
        .with(ft_tester())
}

/// Placeholder used by fault-tolerance testing. It cannot be queried, so selection never picks it.
fn ft_tester() -> ProviderDescriptor {
    ProviderDescriptor::new("ft_tester", "ft")
}
