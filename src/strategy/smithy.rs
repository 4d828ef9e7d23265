//! Strategies built around smithy draws.

use super::{PlayerStrategy, TurnView};
use crate::cards::CardId;

/// Big money plus up to three smithies.
#[derive(Debug, Default)]
pub struct BigMoneySmithy {
    goal: Option<CardId>,
    num_smithy: u32,
}

impl PlayerStrategy for BigMoneySmithy {
    fn name(&self) -> &'static str {
        "Big Money with Smithy"
    }

    fn action_turn(&mut self, view: &TurnView<'_>) -> Option<CardId> {
        view.first_action()
    }

    fn buy_goal(&mut self, view: &TurnView<'_>) -> Option<CardId> {
        let money = view.money();
        if money >= 8 && view.supply_count("province") > 0 {
            return view.card("province");
        }
        if money >= 6 && view.supply_count("gold") > 0 {
            return view.card("gold");
        }
        if money >= 4 && self.num_smithy < 3 && view.supply_count("smithy") > 0 {
            self.num_smithy += 1;
            return view.card("smithy");
        }
        if money >= 3 && view.supply_count("silver") > 0 {
            return view.card("silver");
        }
        None
    }

    fn goal_slot(&mut self) -> &mut Option<CardId> {
        &mut self.goal
    }
}

/// Smithy buyer that tracks the average treasure value of its deck and
/// only buys more money while three draws are worth too little.
#[derive(Debug)]
pub struct SmartSmithy {
    goal: Option<CardId>,
    avg_value: f64,
    num_cards: u32,
    province_cutoff: u32,
}

impl Default for SmartSmithy {
    fn default() -> Self {
        Self {
            goal: None,
            avg_value: 0.7,
            num_cards: 10,
            province_cutoff: 4,
        }
    }
}

impl SmartSmithy {
    /// Fold a newly bought card's treasure value into the running average.
    fn add_value(&mut self, value: u32) {
        let n = f64::from(self.num_cards);
        self.avg_value = (n * self.avg_value + f64::from(value)) / (n + 1.0);
        self.num_cards += 1;
    }

    #[must_use]
    pub fn avg_value(&self) -> f64 {
        self.avg_value
    }
}

impl PlayerStrategy for SmartSmithy {
    fn name(&self) -> &'static str {
        "Smart Smithy"
    }

    fn action_turn(&mut self, view: &TurnView<'_>) -> Option<CardId> {
        view.first_action()
    }

    fn buy_goal(&mut self, view: &TurnView<'_>) -> Option<CardId> {
        let money = view.money();
        let value_draw_three = self.avg_value * 3.0;

        if money >= 8 {
            self.add_value(0);
            return view.card("province");
        }
        if money >= 6 && value_draw_three <= 3.0 {
            if view.supply_count("province") >= self.province_cutoff {
                self.add_value(3);
                return view.card("gold");
            }
            self.add_value(0);
            if view.supply_count("duchy") > 0 {
                return view.card("duchy");
            }
        }
        if money >= 4 && value_draw_three <= 2.0 {
            self.add_value(2);
            return view.card("silver");
        }
        if money >= 4 {
            self.add_value(0);
            if view.supply_count("smithy") > 0 {
                return view.card("smithy");
            }
        }
        if money >= 3 {
            self.add_value(2);
            return view.card("silver");
        }
        None
    }

    fn goal_slot(&mut self) -> &mut Option<CardId> {
        &mut self.goal
    }
}

/// Province at 8, gold or duchy at 6 depending on provinces left, duchy
/// at 5, smithy at 4, silver at 3.
#[derive(Debug, Default)]
pub struct SmartDuchy {
    goal: Option<CardId>,
}

impl PlayerStrategy for SmartDuchy {
    fn name(&self) -> &'static str {
        "Smart Duchy"
    }

    fn action_turn(&mut self, view: &TurnView<'_>) -> Option<CardId> {
        view.first_action()
    }

    fn buy_goal(&mut self, view: &TurnView<'_>) -> Option<CardId> {
        let money = view.money();
        if money >= 8 && view.supply_count("province") > 0 {
            return view.card("province");
        }
        if money >= 6 {
            if view.supply_count("province") >= 4 {
                return view.card("gold");
            } else if view.supply_count("duchy") > 0 {
                return view.card("duchy");
            }
        }
        if money >= 5 && view.supply_count("duchy") > 0 {
            return view.card("duchy");
        }
        if money >= 4 && view.supply_count("smithy") > 0 {
            return view.card("smithy");
        }
        if money >= 3 {
            return view.card("silver");
        }
        None
    }

    fn goal_slot(&mut self) -> &mut Option<CardId> {
        &mut self.goal
    }
}
