use rand::Rng;

use crate::game_params::GeneratorParams;
use crate::lane::LaneType;

/// Biased Markov chain over `{Grass, Road}` with a hazard-streak cap.
///
/// Rules, first match wins:
/// 1. While the initial grass budget lasts: Grass.
/// 2. After `max_consecutive_hazards` roads: Grass.
/// 3. After grass: Road with probability `grass_to_road`.
/// 4. After road: Grass with probability `road_escape`, otherwise repeat the
///    previous type with probability `stickiness` or flip it.
#[derive(Debug, Clone)]
pub struct LaneTypeGenerator {
    params: GeneratorParams,
    grass_budget: u32,
    consecutive_hazards: u32,
    last_type: LaneType,
}

impl LaneTypeGenerator {
    pub fn new(params: GeneratorParams) -> Self {
        Self {
            params,
            grass_budget: params.init_grass_block,
            consecutive_hazards: 0,
            last_type: LaneType::Grass,
        }
    }

    pub fn next(&mut self, rng: &mut impl Rng) -> LaneType {
        let lane_type = self.pick(rng);
        self.last_type = lane_type;
        lane_type
    }

    fn pick(&mut self, rng: &mut impl Rng) -> LaneType {
        if self.grass_budget > 0 {
            self.grass_budget -= 1;
            self.consecutive_hazards = 0;
            return LaneType::Grass;
        }

        if self.consecutive_hazards >= self.params.max_consecutive_hazards {
            self.consecutive_hazards = 0;
            return LaneType::Grass;
        }

        if self.last_type == LaneType::Grass {
            self.consecutive_hazards = 1;
            return if rng.gen::<f32>() < self.params.grass_to_road {
                LaneType::Road
            } else {
                LaneType::Grass
            };
        }

        if rng.gen::<f32>() < self.params.road_escape {
            self.consecutive_hazards = 0;
            return LaneType::Grass;
        }

        let lane_type = if rng.gen::<f32>() < self.params.stickiness {
            self.last_type
        } else {
            self.last_type.flipped()
        };
        if lane_type.is_hazard() {
            self.consecutive_hazards += 1;
        } else {
            self.consecutive_hazards = 0;
        }
        lane_type
    }

    pub fn consecutive_hazards(&self) -> u32 {
        self.consecutive_hazards
    }

    pub fn last_type(&self) -> LaneType {
        self.last_type
    }
}
