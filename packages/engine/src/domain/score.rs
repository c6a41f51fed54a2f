//! Per-player point tally with winner and tie resolution.

/// Scores in registration order. Rendering sorts descending by score with
/// stable ties, so equally scored players appear in the order they
/// registered.
#[derive(Debug, Clone, Default)]
pub struct Scoreboard {
    entries: Vec<(String, u32)>,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the player's score to 0; re-registering also resets to 0.
    pub fn register(&mut self, player: &str) {
        match self.find(player) {
            Some(i) => self.entries[i].1 = 0,
            None => self.entries.push((player.to_string(), 0)),
        }
    }

    pub fn remove(&mut self, player: &str) {
        if let Some(i) = self.find(player) {
            self.entries.remove(i);
        }
    }

    /// Award one point. Unknown players are ignored.
    pub fn award(&mut self, player: &str) {
        if let Some(i) = self.find(player) {
            self.entries[i].1 += 1;
        }
    }

    /// Take one point away, saturating at 0.
    pub fn deduct(&mut self, player: &str) {
        if let Some(i) = self.find(player) {
            self.entries[i].1 = self.entries[i].1.saturating_sub(1);
        }
    }

    pub fn get(&self, player: &str) -> Option<u32> {
        self.find(player).map(|i| self.entries[i].1)
    }

    pub fn contains(&self, player: &str) -> bool {
        self.find(player).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The maximum score, or 0 if nobody is registered.
    pub fn highest(&self) -> u32 {
        self.entries.iter().map(|&(_, s)| s).max().unwrap_or(0)
    }

    /// Every player tied at the maximum score, in registration order.
    /// Ties are preserved, not broken.
    pub fn winners(&self) -> Vec<&str> {
        let top = self.highest();
        self.entries
            .iter()
            .filter(|&&(_, s)| s == top)
            .map(|(p, _)| p.as_str())
            .collect()
    }

    /// `Scores: a-3p, b-1p.` — descending, stable on ties.
    pub fn render(&self) -> String {
        let mut sorted: Vec<&(String, u32)> = self.entries.iter().collect();
        sorted.sort_by_key(|&&(_, s)| std::cmp::Reverse(s));
        let parts: Vec<String> = sorted
            .iter()
            .map(|(p, s)| format!("{p}-{s}p"))
            .collect();
        format!("Scores: {}.", parts.join(", "))
    }

    fn find(&self, player: &str) -> Option<usize> {
        self.entries.iter().position(|(p, _)| p == player)
    }
}
