use std::fs;
use std::io::Write;

use approx::assert_relative_eq;
use kerbol_mechanics::config::{ConfigError, default_parent, load_bodies, load_catalog};
use kerbol_mechanics::core::constants::G;
use kerbol_mechanics::orbits::{BodyDescriptor, Catalog, CatalogError, Orbit};

fn stock() -> Catalog {
    load_catalog("configs/kerbol_system.yaml").expect("stock catalog should load")
}

#[test]
fn stock_catalog_has_the_expected_tree() {
    let catalog = stock();
    assert_eq!(catalog.len(), 17);
    assert_eq!(catalog.root().name, "Sun");

    let kerbin = catalog.by_name("kerbin").expect("Kerbin present");
    let mun = catalog.by_name("MUN").expect("Mun present");
    let laythe = catalog.by_name("Laythe").expect("Laythe present");
    assert_eq!(mun.primary, Some(kerbin.id));
    assert!(kerbin.secondaries.contains(&mun.id));
    assert_eq!(
        catalog.primary_of(laythe.id).map(|b| b.name.as_str()),
        Some("Jool")
    );
    assert_eq!(
        mun.orbit.and_then(|o| o.primary),
        Some(kerbin.id),
        "orbits are linked to their primary"
    );

    let duna = catalog.by_name("Duna").unwrap();
    assert_eq!(catalog.common_ancestor(mun.id, duna.id), Some(catalog.root().id));
    assert_eq!(catalog.ancestors(mun.id), vec![kerbin.id, catalog.root().id]);
}

#[test]
fn stock_bodies_carry_physical_data() {
    let catalog = stock();
    let kerbin = catalog.by_name("Kerbin").unwrap();
    assert_relative_eq!(kerbin.gravitational_parameter, 3.530461e12);
    assert_relative_eq!(kerbin.parking_orbit_height, 80_000.0);
    assert_eq!(kerbin.launch_delta_v, Some(4_550.0));
    assert!(kerbin.has_atmosphere());
    assert!(kerbin.atmosphere_contains_oxygen);

    let orbit = kerbin.orbit.unwrap();
    assert_relative_eq!(orbit.semi_major_axis, 13_599_840_256.0);
    let year = orbit.period(&catalog).unwrap();
    assert!((year / 21_600.0 - 426.89).abs() < 0.01, "year = {} days", year / 21_600.0);

    let duna = catalog.by_name("Duna").unwrap();
    assert_relative_eq!(
        duna.orbit.unwrap().longitude_of_ascending_node,
        135.5_f64.to_radians()
    );
}

#[test]
fn parking_height_defaults_above_the_atmosphere() {
    let catalog = stock();
    // Jool has an atmosphere but no configured parking orbit
    let jool = catalog.by_name("Jool").unwrap();
    assert_relative_eq!(jool.parking_orbit_height, 210_000.0);
    let mun = catalog.by_name("Mun").unwrap();
    assert_relative_eq!(mun.parking_orbit_height, 10_000.0);
}

#[test]
fn body_rotation_derivatives() {
    let catalog = stock();
    let kerbin = catalog.by_name("Kerbin").unwrap();
    let synchronous = kerbin.synchronous_orbit_height().unwrap();
    assert!(
        (synchronous - 2_862_962.0).abs() < 10.0,
        "synchronous = {synchronous}"
    );
    assert!(kerbin.semi_synchronous_orbit_height().unwrap() < synchronous);
    assert_relative_eq!(
        kerbin.surface_rotation_speed().unwrap(),
        174.94,
        epsilon = 0.01
    );
    assert_eq!(kerbin.tidally_locked(&catalog), Some(false));

    let sun = catalog.root();
    assert_eq!(sun.tidally_locked(&catalog), None);
}

#[test]
fn default_parents_cover_the_stock_system() {
    assert_eq!(default_parent("Duna"), Some("Sun"));
    assert_eq!(default_parent("gilly"), Some("Eve"));
    assert_eq!(default_parent("Ike"), Some("Duna"));
    assert_eq!(default_parent("Pol"), Some("Jool"));
    assert_eq!(default_parent("Sun"), None);
    assert_eq!(default_parent("Vulcan"), None);
}

#[test]
fn builder_rejects_malformed_trees() {
    let mut builder = Catalog::builder();
    builder.add_body(BodyDescriptor::new("Sun", 1.0e18, 1.0e8));
    builder.add_body(BodyDescriptor::new("sun", 1.0e18, 1.0e8));
    assert!(matches!(builder.build(), Err(CatalogError::DuplicateName(_))));

    let mut builder = Catalog::builder();
    builder.add_body(BodyDescriptor::new("Sun", 1.0e18, 1.0e8));
    builder.add_body(BodyDescriptor::new("Other", 1.0e18, 1.0e8));
    assert!(matches!(builder.build(), Err(CatalogError::MultipleRoots(_, _))));

    let mut builder = Catalog::builder();
    let sun = builder.add_body(BodyDescriptor::new("Sun", 1.0e18, 1.0e8));
    let planet = builder.add_body(BodyDescriptor::new("Planet", 1.0e12, 5.0e5));
    builder.attach(planet, sun);
    assert_eq!(
        builder.build().unwrap_err(),
        CatalogError::MissingOrbit("Planet".to_string())
    );

    let orbit = Orbit {
        semi_major_axis: 1.0e9,
        ..Orbit::default()
    };
    let mut builder = Catalog::builder();
    let a = builder.add_body(BodyDescriptor::new("A", 1.0e12, 5.0e5).with_orbit(orbit));
    let b = builder.add_body(BodyDescriptor::new("B", 1.0e12, 5.0e5).with_orbit(orbit));
    builder.add_body(BodyDescriptor::new("Root", 1.0e18, 1.0e8));
    builder.attach(a, b).attach(b, a);
    assert!(matches!(builder.build(), Err(CatalogError::Cycle(_))));
}

#[test]
fn yaml_catalog_with_explicit_parents_and_mass() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(
        file,
        r#"
- name: Star
  mass: 1.0e28
  radius: 1.0e8
- name: Rock
  parent: Star
  mu: 4.0e12
  radius: 500000
  rotation_period: 20000
  orbit:
    semi_major_axis: 1.0e10
    eccentricity: 0.1
    inclination_deg: 90
"#
    )
    .unwrap();

    let bodies = load_bodies(file.path()).unwrap();
    assert_eq!(bodies.len(), 2);
    assert_eq!(bodies[1].parent.as_deref(), Some("Star"));

    let catalog = load_catalog(file.path()).unwrap();
    let star = catalog.by_name("Star").unwrap();
    assert_relative_eq!(star.gravitational_parameter, 1.0e28 * G, max_relative = 1e-12);
    let rock = catalog.by_name("Rock").unwrap();
    assert_eq!(rock.primary, Some(star.id));
    assert_relative_eq!(rock.orbit.unwrap().inclination, std::f64::consts::FRAC_PI_2);
}

#[test]
fn unknown_explicit_parent_is_an_error() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(
        file,
        r#"
- name: Star
  mu: 1.0e18
  radius: 1.0e8
- name: Rock
  parent: Nowhere
  mu: 4.0e12
  radius: 500000
  orbit:
    semi_major_axis: 1.0e10
"#
    )
    .unwrap();
    let err = load_catalog(file.path()).unwrap_err();
    assert!(
        matches!(
            err,
            ConfigError::Catalog(CatalogError::UnknownParent { ref parent, .. }) if parent == "Nowhere"
        ),
        "unexpected error: {err}"
    );
}

#[test]
fn toml_directory_records_use_the_stock_parent_table() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("01_kerbin.toml"),
        r#"
name = "Kerbin"
mu = 3.530461e12
radius = 600000.0
rotation_period = 21549.425
max_atmosphere_height = 70000.0
"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("02_mun.toml"),
        r#"
name = "Mun"
mu = 6.5138398e10
radius = 200000.0

[orbit]
semi_major_axis = 12000000.0
mean_anomaly_at_epoch = 1.7
"#,
    )
    .unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let bodies = load_bodies(dir.path()).unwrap();
    assert_eq!(
        bodies.iter().map(|b| b.name.as_str()).collect::<Vec<_>>(),
        ["Kerbin", "Mun"]
    );

    // Kerbin's stock parent is absent, so it becomes the root
    let catalog = load_catalog(dir.path()).unwrap();
    assert_eq!(catalog.root().name, "Kerbin");
    let mun = catalog.by_name("Mun").unwrap();
    assert_eq!(mun.primary, Some(catalog.root().id));
}

#[test]
fn single_toml_file_loads_one_body() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "name = \"Lone\"\nmu = 1.0e12\nradius = 1000.0").unwrap();
    let catalog = load_catalog(file.path()).unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.root().name, "Lone");
}

#[test]
fn missing_file_reports_io_error() {
    let err = load_bodies("configs/does_not_exist.yaml").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}
