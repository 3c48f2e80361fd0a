//! End-of-run report.

use battle_core::{BattleOutcome, BattleResult, BattleView, Side};

pub struct RunSummary {
    pub encounter: String,
    pub seed: u64,
    pub ticks: u64,
    pub elapsed_secs: f64,
    pub events: usize,
    pub outcome: BattleOutcome,
    pub final_view: BattleView,
}

impl RunSummary {
    pub fn to_json(&self) -> anyhow::Result<String> {
        let rosters: Vec<_> = self
            .final_view
            .rosters
            .iter()
            .filter(|entry| entry.side == Side::Player)
            .collect();
        let value = serde_json::json!({
            "encounter": self.encounter,
            "seed": self.seed,
            "result": self.outcome.result,
            "ticks": self.ticks,
            "elapsed_secs": self.elapsed_secs,
            "events": self.events,
            "player_roster": rosters,
        });
        Ok(serde_json::to_string_pretty(&value)?)
    }

    pub fn to_text(&self) -> String {
        let result = match self.outcome.result {
            Some(BattleResult::Victory) => "victory",
            Some(BattleResult::Defeat) => "defeat",
            None => "unfinished",
        };

        let mut out = format!(
            "{}: {} after {:.1}s ({} ticks, {} events, seed {})\n",
            self.encounter, result, self.elapsed_secs, self.ticks, self.events, self.seed
        );
        for (index, monster) in self.outcome.player_roster.iter() {
            out.push_str(&format!(
                "  #{index} {:<12} lv {:>2}  hp {:>7.2}/{:<7.2}  xp {:.0}/{:.0}\n",
                monster.species().to_string(),
                monster.level(),
                monster.health,
                monster.max_health(),
                monster.xp,
                monster.level_threshold(),
            ));
        }
        out
    }
}
