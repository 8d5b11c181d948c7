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

    fn choice<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let years = [2021i32, 2022, 2023, 2024, 2025];
    let seniorities = ["junior", "pleno", "senior", "executivo"];
    let seniority_factor = [0.55, 0.85, 1.15, 1.6];
    let contracts = ["integral", "parcial", "contrato", "freelancer"];
    let company_sizes = ["pequena", "media", "grande"];
    let work_modes = ["presencial", "hibrido", "remoto"];
    let countries = [
        "USA", "BRA", "GBR", "DEU", "CAN", "IND", "ESP", "PRT", "FRA", "NLD",
    ];
    // Twelve roles so the top-10 chart has something to cut.
    let roles: [(&str, f64); 12] = [
        ("Data Scientist", 125_000.0),
        ("Data Engineer", 120_000.0),
        ("Data Analyst", 85_000.0),
        ("Machine Learning Engineer", 140_000.0),
        ("Analytics Engineer", 110_000.0),
        ("Research Scientist", 150_000.0),
        ("Data Architect", 145_000.0),
        ("BI Analyst", 80_000.0),
        ("Data Manager", 130_000.0),
        ("MLOps Engineer", 135_000.0),
        ("Applied Scientist", 155_000.0),
        ("Business Analyst", 75_000.0),
    ];

    let output_path = "salaries_sample.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer
        .write_record([
            "ano",
            "senioridade",
            "contrato",
            "tamanho_empresa",
            "cargo",
            "usd",
            "remoto",
            "residencia_iso3",
        ])
        .expect("Failed to write header");

    let n_rows = 800;
    for _ in 0..n_rows {
        let year = *rng.choice(&years);
        let seniority_idx = (rng.next_u64() % seniorities.len() as u64) as usize;
        let contract = *rng.choice(&contracts);
        let company_size = *rng.choice(&company_sizes);
        let work_mode = *rng.choice(&work_modes);
        let country = *rng.choice(&countries);
        let (role, base) = *rng.choice(&roles);

        let country_factor = match country {
            "USA" => 1.25,
            "CAN" | "GBR" | "DEU" => 1.05,
            "BRA" | "IND" => 0.45,
            _ => 0.8,
        };
        let salary = rng
            .gauss(base * seniority_factor[seniority_idx] * country_factor, base * 0.12)
            .max(15_000.0);

        writer
            .write_record([
                year.to_string(),
                seniorities[seniority_idx].to_string(),
                contract.to_string(),
                company_size.to_string(),
                role.to_string(),
                format!("{salary:.0}"),
                work_mode.to_string(),
                country.to_string(),
            ])
            .expect("Failed to write row");
    }

    writer.flush().expect("Failed to flush output");
    println!("Wrote {n_rows} salary records to {output_path}");
}
