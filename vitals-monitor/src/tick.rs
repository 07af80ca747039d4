/// Work run from a periodic hardware timer interrupt.
///
/// Called once per tick ([`TICK_PERIOD_MS`](crate::constants::TICK_PERIOD_MS)).
/// Implementations run in interrupt context: they must finish in bounded
/// time and must not block, allocate, or take locks.
pub trait TickHandler {
    /// Handle one timer tick.
    fn on_tick(&mut self);
}
