use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::SiteId;

/// Sites the "random" choice draws from. Multi-image and filtered sites are
/// left out so a random pick always yields exactly one image.
pub const RANDOM_POOL: [SiteId; 5] = [
    SiteId::NationalGeographic,
    SiteId::Bing,
    SiteId::WikimediaCommons,
    SiteId::Nasa,
    SiteId::Smithsonian,
];

pub fn pick<R: Rng + ?Sized>(rng: &mut R) -> SiteId {
    *RANDOM_POOL
        .choose(rng)
        .unwrap_or(&SiteId::Nasa)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_stays_in_pool() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            assert!(RANDOM_POOL.contains(&pick(&mut rng)));
        }
    }

    #[test]
    fn test_pick_reaches_every_site() {
        let mut rng = rand::thread_rng();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1000 {
            seen.insert(pick(&mut rng));
        }
        assert_eq!(seen.len(), RANDOM_POOL.len());
    }
}
