use crate::calendar::CalendarMonth;

/// Steps the projection forward one calendar month at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationClock {
    current: CalendarMonth,
    elapsed: u32,
    /// Safety cap on simulated months
    max_months: Option<u32>,
}

impl SimulationClock {
    /// Unbounded clock; the caller's stop rule must end the run
    pub fn new(start: CalendarMonth) -> Self {
        Self {
            current: start,
            elapsed: 0,
            max_months: None,
        }
    }

    pub fn capped(start: CalendarMonth, max_months: u32) -> Self {
        Self {
            max_months: Some(max_months),
            ..Self::new(start)
        }
    }

    /// Next month to simulate
    pub fn current(&self) -> CalendarMonth {
        self.current
    }

    /// Months simulated so far
    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn exhausted(&self) -> bool {
        self.max_months.is_some_and(|max| self.elapsed >= max)
    }

    pub fn tick(&mut self) {
        self.current = self.current.next();
        self.elapsed += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick() {
        let mut clock = SimulationClock::new(CalendarMonth::new(2025, 10));
        clock.tick();
        clock.tick();

        assert_eq!(clock.current(), CalendarMonth::new(2026, 0));
        assert_eq!(clock.elapsed(), 2);
        assert!(!clock.exhausted());
    }

    #[test]
    fn test_cap() {
        let mut clock = SimulationClock::capped(CalendarMonth::december(2025), 2);
        assert!(!clock.exhausted());
        clock.tick();
        clock.tick();
        assert!(clock.exhausted());
    }

    #[test]
    fn test_zero_cap_is_exhausted_immediately() {
        assert!(SimulationClock::capped(CalendarMonth::december(2025), 0).exhausted());
    }
}
