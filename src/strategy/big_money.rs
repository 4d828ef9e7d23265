//! Money-first strategies that never play actions.

use super::{PlayerStrategy, TurnView};
use crate::cards::CardId;

/// Province at 8, gold at 6, silver at 3.
#[derive(Debug, Default)]
pub struct BigMoney {
    goal: Option<CardId>,
}

impl PlayerStrategy for BigMoney {
    fn name(&self) -> &'static str {
        "Big Money"
    }

    fn action_turn(&mut self, _view: &TurnView<'_>) -> Option<CardId> {
        None
    }

    fn buy_goal(&mut self, view: &TurnView<'_>) -> Option<CardId> {
        let money = view.money();
        if money >= 8 {
            view.card("province")
        } else if money >= 6 {
            view.card("gold")
        } else if money >= 3 {
            view.card("silver")
        } else {
            None
        }
    }

    fn goal_slot(&mut self) -> &mut Option<CardId> {
        &mut self.goal
    }
}

/// Big money that switches from gold to duchies once provinces run low.
#[derive(Debug, Default)]
pub struct SmartBigMoney {
    goal: Option<CardId>,
}

impl PlayerStrategy for SmartBigMoney {
    fn name(&self) -> &'static str {
        "Smart Big Money"
    }

    fn action_turn(&mut self, _view: &TurnView<'_>) -> Option<CardId> {
        None
    }

    fn buy_goal(&mut self, view: &TurnView<'_>) -> Option<CardId> {
        let money = view.money();
        if money >= 8 {
            return view.card("province");
        }
        if money >= 6 {
            if view.supply_count("province") >= 5 {
                return view.card("gold");
            }
            if view.supply_count("duchy") > 0 {
                return view.card("duchy");
            }
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

/// Buys only victory cards.
#[derive(Debug, Default)]
pub struct PointsOnly {
    goal: Option<CardId>,
}

impl PlayerStrategy for PointsOnly {
    fn name(&self) -> &'static str {
        "Points Only"
    }

    fn action_turn(&mut self, _view: &TurnView<'_>) -> Option<CardId> {
        None
    }

    fn buy_goal(&mut self, view: &TurnView<'_>) -> Option<CardId> {
        let money = view.money();
        if money >= 8 && view.supply_count("province") > 0 {
            view.card("province")
        } else if money >= 5 && view.supply_count("duchy") > 0 {
            view.card("duchy")
        } else if money >= 2 && view.supply_count("estate") > 0 {
            view.card("estate")
        } else {
            None
        }
    }

    fn goal_slot(&mut self) -> &mut Option<CardId> {
        &mut self.goal
    }
}
