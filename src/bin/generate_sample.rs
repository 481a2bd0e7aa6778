use anyhow::{Context, Result};
use serde::Serialize;

/// One output row, using the column names the dashboard expects plus two
/// extra columns the loader ignores.
#[derive(Serialize)]
struct Row<'a> {
    #[serde(rename = "Flight Number")]
    flight_number: u32,
    #[serde(rename = "Launch Site")]
    launch_site: &'a str,
    class: u8,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "Booster Version")]
    booster_version: String,
    #[serde(rename = "Booster Version Category")]
    booster_version_category: &'a str,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// Booster generations in flight order: (category, first flight, max payload kg).
const GENERATIONS: [(&str, u32, f64); 5] = [
    ("v1.0", 1, 700.0),
    ("v1.1", 6, 4500.0),
    ("FT", 21, 6000.0),
    ("B4", 41, 9600.0),
    ("B5", 53, 7000.0),
];

const TOTAL_FLIGHTS: u32 = 56;

fn generation(flight: u32) -> (&'static str, f64) {
    GENERATIONS
        .iter()
        .rev()
        .find(|(_, first, _)| flight >= *first)
        .map(|&(cat, _, max)| (cat, max))
        .unwrap_or(("v1.0", 700.0))
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let early_sites = ["CCAFS LC-40", "VAFB SLC-4E"];
    let late_sites = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];

    let output_path = "sample_launches.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;

    let mut successes = 0;
    for flight in 1..=TOTAL_FLIGHTS {
        let (category, max_payload) = generation(flight);
        let launch_site = if flight < 16 {
            rng.pick(&early_sites)
        } else {
            rng.pick(&late_sites)
        };

        // Success becomes more likely as the programme matures.
        let p_success = 0.2 + 0.75 * flight as f64 / TOTAL_FLIGHTS as f64;
        let class = u8::from(rng.next_f64() < p_success);
        successes += u32::from(class);

        let payload_mass_kg = if flight <= 2 {
            0.0
        } else {
            (rng.next_f64() * max_payload).round()
        };

        writer
            .serialize(Row {
                flight_number: flight,
                launch_site,
                class,
                payload_mass_kg,
                booster_version: format!("F9 {category} B{:04}", 1000 + flight),
                booster_version_category: category,
            })
            .with_context(|| format!("writing flight {flight}"))?;
    }
    writer.flush().context("flushing CSV")?;

    println!(
        "Wrote {TOTAL_FLIGHTS} launches ({successes} successful) to {output_path}"
    );
    Ok(())
}
