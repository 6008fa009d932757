use crate::player::Player;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::fmt;

pub const JACKPOT_AMOUNT: u32 = 10_000;
pub const CAR_PRIZE: &str = "Car";
const HALF_CARS_PER_CAR: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wedge {
    Cash(u32),
    Jackpot,
    Bankrupt,
    LoseATurn,
    HalfCar,
}

impl fmt::Display for Wedge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cash(amount) => write!(f, "${amount}"),
            Self::Jackpot => write!(f, "JACKPOT"),
            Self::Bankrupt => write!(f, "BANKRUPT"),
            Self::LoseATurn => write!(f, "LOSE A TURN"),
            Self::HalfCar => write!(f, "1/2 CAR"),
        }
    }
}

pub const WHEEL: [Wedge; 26] = [
    Wedge::Cash(500),
    Wedge::HalfCar,
    Wedge::Cash(500),
    Wedge::Bankrupt,
    Wedge::Cash(2500),
    Wedge::Cash(600),
    Wedge::Cash(500),
    Wedge::Jackpot,
    Wedge::Cash(500),
    Wedge::Cash(500),
    Wedge::Bankrupt,
    Wedge::Cash(1500),
    Wedge::Cash(400),
    Wedge::Cash(300),
    Wedge::HalfCar,
    Wedge::Cash(300),
    Wedge::Cash(300),
    Wedge::LoseATurn,
    Wedge::Cash(600),
    Wedge::Cash(300),
    Wedge::LoseATurn,
    Wedge::Cash(800),
    Wedge::Cash(800),
    Wedge::Cash(900),
    Wedge::Cash(700),
    Wedge::Cash(600),
];

pub fn spin<R: Rng + ?Sized>(rng: &mut R) -> Wedge {
    *WHEEL.choose(rng).unwrap_or(&Wedge::LoseATurn)
}

/// What a special wedge did to the player. Every variant ends the turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpinOutcome {
    Bankrupt,
    LoseATurn,
    HalfCar { count: u32, won_car: bool },
}

/// Applies a wedge that resolves before the player moves.
///
/// Returns `None` for cash and jackpot wedges, which only pay out once a
/// letter is called.
pub fn resolve_spin(player: &mut Player, wedge: Wedge) -> Option<SpinOutcome> {
    match wedge {
        Wedge::Bankrupt => {
            player.go_bankrupt();
            Some(SpinOutcome::Bankrupt)
        }
        Wedge::LoseATurn => Some(SpinOutcome::LoseATurn),
        Wedge::HalfCar => {
            player.half_car_count += 1;
            let won_car = player.half_car_count >= HALF_CARS_PER_CAR;
            if won_car {
                player.add_prize(CAR_PRIZE);
                player.half_car_count -= HALF_CARS_PER_CAR;
            }
            Some(SpinOutcome::HalfCar {
                count: player.half_car_count,
                won_car,
            })
        }
        Wedge::Cash(_) | Wedge::Jackpot => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Award {
    Money(u32),
    Prize(String),
}

/// Pays out a correctly called letter that appears `count` times.
pub fn award_letter(player: &mut Player, wedge: Wedge, count: usize) -> Award {
    let count = u32::try_from(count).unwrap_or(u32::MAX);
    match wedge {
        Wedge::Cash(amount) => {
            let winnings = amount.saturating_mul(count);
            player.add_money(winnings);
            Award::Money(winnings)
        }
        Wedge::Jackpot => {
            let winnings = JACKPOT_AMOUNT.saturating_mul(count);
            player.add_money(winnings);
            Award::Money(winnings)
        }
        other => {
            let prize = other.to_string();
            player.add_prize(&prize);
            Award::Prize(prize)
        }
    }
}
