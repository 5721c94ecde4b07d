/// Frame counter driving the pending-state spinner.
/// Advanced once per render tick (~100ms).
#[derive(Debug, Default)]
pub struct AnimationClock {
    frame_counter: u64,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self) {
        self.frame_counter = self.frame_counter.wrapping_add(1);
    }

    /// Braille spinner, one step every two frames
    pub fn spinner_char(&self) -> char {
        const SPINNERS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
        SPINNERS[(self.frame_counter / 2) as usize % SPINNERS.len()]
    }

    /// "", ".", "..", "..." cycling, for "Thinking..." and friends
    pub fn ellipsis(&self) -> &'static str {
        const DOTS: [&str; 4] = ["", ".", "..", "..."];
        DOTS[(self.frame_counter / 4) as usize % DOTS.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_advances_every_two_ticks() {
        let mut clock = AnimationClock::new();
        let initial = clock.spinner_char();
        clock.tick();
        assert_eq!(clock.spinner_char(), initial);
        clock.tick();
        assert_ne!(clock.spinner_char(), initial);
    }

    #[test]
    fn test_ellipsis_cycles() {
        let mut clock = AnimationClock::new();
        assert_eq!(clock.ellipsis(), "");
        for _ in 0..4 {
            clock.tick();
        }
        assert_eq!(clock.ellipsis(), ".");
        for _ in 0..12 {
            clock.tick();
        }
        assert_eq!(clock.ellipsis(), "");
    }
}
