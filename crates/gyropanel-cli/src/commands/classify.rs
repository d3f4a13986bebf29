use gyropanel_core::mode::RULES;
use gyropanel_core::Angles;

pub fn run(alpha: f64, beta: f64, gamma: f64) -> Result<(), Box<dyn std::error::Error>> {
    let angles = Angles { alpha, beta, gamma };
    match RULES.iter().find(|rule| (rule.matches)(&angles)) {
        Some(rule) => println!("{} ({})", rule.mode, rule.name),
        None => println!("none"),
    }
    Ok(())
}
