use bizdemo::config::{DEFAULT_DATA_PATH, DEFAULT_MODEL_PATH};
use bizdemo::data::regression::LinearModel;
use serde::Serialize;

/// One CSV row, using the column names the dashboard expects.
#[derive(Serialize)]
struct Row {
    nome_municipio: String,
    uf_sigla: &'static str,
    #[serde(rename = "Numero_Empresas_Atuantes")]
    numero_empresas_atuantes: u64,
    pib_total: f64,
    pop_total: u64,
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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    // Coefficients the synthetic data is generated from; written out as the model.
    let model = LinearModel::new(2.4e-7, 0.012, 35.0);

    // (UF, municipalities, GDP per capita in R$)
    let states: [(&str, usize, f64); 8] = [
        ("SP", 60, 58_000.0),
        ("RJ", 35, 52_000.0),
        ("MG", 55, 36_000.0),
        ("BA", 40, 22_000.0),
        ("PR", 40, 45_000.0),
        ("RS", 40, 48_000.0),
        ("PE", 30, 23_000.0),
        ("CE", 30, 20_000.0),
    ];

    let mut writer = csv::Writer::from_path(DEFAULT_DATA_PATH).expect("Failed to create CSV file");
    let mut rows = 0usize;

    for (uf, count, gdp_per_capita) in states {
        for i in 0..count {
            // Log-normal population between a few thousand and a few million.
            let population = rng.gauss(10.0, 1.3).exp().clamp(1_500.0, 12_000_000.0).round();
            let gdp = (population * gdp_per_capita * rng.gauss(1.0, 0.25).max(0.2)).round();

            let expected = model.evaluate(gdp, population);
            let noisy = expected * rng.gauss(1.0, 0.15);

            writer
                .serialize(Row {
                    nome_municipio: format!("Município {uf}-{:03}", i + 1),
                    uf_sigla: uf,
                    numero_empresas_atuantes: noisy.max(0.0).round() as u64,
                    pib_total: gdp,
                    pop_total: population as u64,
                })
                .expect("Failed to write CSV row");
            rows += 1;
        }
    }
    writer.flush().expect("Failed to flush CSV file");

    let json = model.to_json().expect("Failed to serialise model");
    std::fs::write(DEFAULT_MODEL_PATH, json).expect("Failed to write model file");

    let bin_path = std::path::Path::new(DEFAULT_MODEL_PATH).with_extension("bin");
    std::fs::write(&bin_path, model.to_bytes()).expect("Failed to write binary model");

    println!(
        "Wrote {rows} municipalities to {DEFAULT_DATA_PATH}, model to {DEFAULT_MODEL_PATH} and {}",
        bin_path.display()
    );
}
