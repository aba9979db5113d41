use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use rotorcrack::api::CrackReport;
use rotorcrack::machine::MachineConfiguration;
use rotorcrack::scorer::{TextStats, ENGLISH_IC, RANDOM_IC};

const PLAINTEXT_WIDTH: usize = 60;

fn key_table(config: &MachineConfiguration) -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Slot").add_attribute(Attribute::Bold),
        Cell::new("Rotor").fg(Color::Cyan),
        Cell::new("Start"),
        Cell::new("Ring"),
    ]);
    for (i, slot) in config.slots.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1).add_attribute(Attribute::Bold),
            Cell::new(slot.identity).fg(Color::Cyan),
            Cell::new(slot.start).set_alignment(CellAlignment::Center),
            Cell::new(slot.ring).set_alignment(CellAlignment::Right),
        ]);
    }
    table.add_row(vec![
        Cell::new("Reflector").add_attribute(Attribute::Bold),
        Cell::new(config.reflector),
        Cell::new(""),
        Cell::new(""),
    ]);
    table.add_row(vec![
        Cell::new("Plugboard").add_attribute(Attribute::Bold),
        Cell::new(&config.plugboard).fg(Color::Green),
        Cell::new(""),
        Cell::new(""),
    ]);
    table
}

/// Goes to stderr so enciphered output can be piped on.
pub fn print_key(config: &MachineConfiguration) {
    eprintln!("\n{}", key_table(config));
}

fn stats_row(label: &str, s: &TextStats) -> Vec<Cell> {
    vec![
        Cell::new(label).add_attribute(Attribute::Bold),
        Cell::new(s.letters).set_alignment(CellAlignment::Right),
        Cell::new(format!("{:.5}", s.ic)).fg(Color::Cyan),
        Cell::new(s.trigram_score).set_alignment(CellAlignment::Right),
    ]
}

fn stats_header() -> Vec<Cell> {
    vec![
        Cell::new("Text").add_attribute(Attribute::Bold),
        Cell::new("Letters"),
        Cell::new("IC").fg(Color::Cyan),
        Cell::new("Trigrams"),
    ]
}

pub fn print_crack_report(report: &CrackReport) {
    println!("\n🗝️  Recovered key");
    println!("{}", key_table(&report.configuration));

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.add_row(stats_header());
    table.add_row(stats_row("Ciphertext", &report.ciphertext));
    table.add_row(stats_row("Plaintext", &report.plaintext_stats));
    println!("{}", table);

    println!(
        "Stage ICs: slot 1 {:.5} | slot 2 {:.5} | plugboard {:.5}{}",
        report.stage_one_ic,
        report.stage_two_ic,
        report.climb_ic,
        if report.refined { " | trigram-refined" } else { "" }
    );
    println!("Decodes: {}", report.evaluations);

    println!("\nPlaintext:");
    for line in report.plaintext.as_bytes().chunks(PLAINTEXT_WIDTH) {
        println!("{}", String::from_utf8_lossy(line));
    }
}

pub fn print_stats_report(stats: &TextStats) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.add_row(stats_header());
    table.add_row(stats_row("Input", stats));
    table.add_row(vec![
        Cell::new("English (ref)").add_attribute(Attribute::Italic),
        Cell::new(""),
        Cell::new(format!("{:.5}", ENGLISH_IC)),
        Cell::new(""),
    ]);
    table.add_row(vec![
        Cell::new("Random (ref)").add_attribute(Attribute::Italic),
        Cell::new(""),
        Cell::new(format!("{:.5}", RANDOM_IC)),
        Cell::new(""),
    ]);
    println!("\n{}", table);
}
