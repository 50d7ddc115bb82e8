use tracing::Level;
use tracing::Metadata;
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::Filter;
use tracing_subscriber::registry::LookupSpan;

pub const CRATE_TARGET: &str = "muhasib";

fn is_own_target(meta: &Metadata<'_>) -> bool {
    meta.target().starts_with(CRATE_TARGET)
}

// Exact debug level
pub struct DebugOnlyFilter;

impl<S> Filter<S> for DebugOnlyFilter
where
    S: tracing::Subscriber + for<'lookup> LookupSpan<'lookup>,
{
    fn enabled(
        &self,
        meta: &Metadata<'_>,
        _ctx: &Context<'_, S>,
    ) -> bool {
        meta.level() == &Level::DEBUG && is_own_target(meta)
    }
}

pub struct ErrorWarnFilter;

impl<S> Filter<S> for ErrorWarnFilter
where
    S: tracing::Subscriber + for<'lookup> LookupSpan<'lookup>,
{
    fn enabled(
        &self,
        meta: &Metadata<'_>,
        _ctx: &Context<'_, S>,
    ) -> bool {
        (meta.level() == &Level::ERROR || meta.level() == &Level::WARN) && is_own_target(meta)
    }
}

// Info and above, used for the run log
pub struct InfoAndAboveFilter;

impl<S> Filter<S> for InfoAndAboveFilter
where
    S: tracing::Subscriber + for<'lookup> LookupSpan<'lookup>,
{
    fn enabled(
        &self,
        meta: &Metadata<'_>,
        _ctx: &Context<'_, S>,
    ) -> bool {
        meta.level() <= &Level::INFO && is_own_target(meta)
    }
}
