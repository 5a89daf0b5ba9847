//! Render a small pedigree to SVG and EMF files.
//!
//! Run with: RUST_LOG=debug cargo run --example render_pedigree --features tracing -- out

use std::path::PathBuf;

use pedtree::{EmfOptions, Name, Person, Sex, Size, SvgOptions, TreeOptions, Unit};
use tracing_subscriber::EnvFilter;

fn family() -> Person {
    let grandma = Person::new("I5", Name::new("Maria", "Ivanova").with_maiden("Petrova")).with_sex(Sex::Female);
    let grandpa = Person::new("I4", Name::new("Ivan", "Ivanov")).with_sex(Sex::Male);
    let mother = Person::new("I2", Name::new("Anna", "Smith").with_maiden("Ivanova"))
        .with_sex(Sex::Female)
        .with_mother(grandma)
        .with_father(grandpa);
    let father = Person::new("I3", Name::new("King Huan Carlos TwentySecond", "Smith-and-sometimes-Ivanov"))
        .with_sex(Sex::Male);
    Person::new("I1", Name::new("John", "Smith"))
        .with_sex(Sex::Male)
        .with_mother(mother)
        .with_father(father)
}

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let out_dir = PathBuf::from(std::env::args().nth(1).unwrap_or_else(|| ".".to_string()));
    let person = family();
    let tree_options = TreeOptions {
        width: Size::parse("6in")?,
        ..TreeOptions::default()
    };

    let svg_options = SvgOptions {
        units: Unit::Pt,
        ..SvgOptions::default()
    };
    let Some(svg) = pedtree::render_svg(&person, &tree_options, &svg_options)? else {
        eprintln!("not enough generations to draw");
        return Ok(());
    };
    let svg_path = out_dir.join("pedigree.svg");
    std::fs::write(&svg_path, svg.data.as_bytes()).map_err(|e| miette::miette!("{}: {e}", svg_path.display()))?;
    println!(
        "{} ({}, {} x {})",
        svg_path.display(),
        svg.mime_type,
        svg.width.format(Unit::Mm),
        svg.height.format(Unit::Mm)
    );

    if let Some(emf) = pedtree::render_emf(&person, &tree_options, &EmfOptions::default()) {
        let emf_path = out_dir.join("pedigree.emf");
        std::fs::write(&emf_path, emf.data.as_bytes()).map_err(|e| miette::miette!("{}: {e}", emf_path.display()))?;
        println!(
            "{} ({}, {} x {} px)",
            emf_path.display(),
            emf.mime_type,
            emf.width.px(),
            emf.height.px()
        );
    }

    Ok(())
}
