//! Integration tests for loading, saving and startup fallback

use std::fs;

use tempfile::TempDir;
use vehicle_registry::{
    Coordinates, FileManager, FuelType, StoreError, VehicleDraft, VehicleRegistry, VehicleType,
};

fn draft_x() -> VehicleDraft {
    VehicleDraft::new("X", Coordinates::new(10.0, 2).unwrap(), 5.0, 3.0, VehicleType::Car)
}

const ONE_VEHICLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<vehicles>
  <vehicle>
    <id>4</id>
    <name>Nautilus</name>
    <coordinates>
      <x>{X}</x>
      <y>-20</y>
    </coordinates>
    <creationDate>2022-06-01</creationDate>
    <enginePower>900.0</enginePower>
    <capacity>12.0</capacity>
    <type>SUBMARINE</type>
    <fuelType>null</fuelType>
  </vehicle>
</vehicles>"#;

#[test]
fn test_empty_file_add_save_reload() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("vehicles.xml");
    fs::write(&path, "").unwrap();

    // Session 1: empty file, add one vehicle, save
    {
        let mut registry = VehicleRegistry::open_path(&path);
        assert!(registry.load_warning().is_none());
        assert_eq!(registry.info().len, 0);

        assert_eq!(registry.add(draft_x()).unwrap(), 1);
        registry.save().unwrap();
    }

    // Session 2: fresh load reproduces it
    let registry = VehicleRegistry::open_path(&path);
    assert!(registry.load_warning().is_none());
    let vehicles = registry.show();
    assert_eq!(vehicles.len(), 1);
    assert_eq!(vehicles[0].id(), 1);
    assert_eq!(vehicles[0].name(), "X");
    assert_eq!(vehicles[0].vehicle_type(), VehicleType::Car);
}

#[test]
fn test_out_of_range_x_aborts_load() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("vehicles.xml");
    fs::write(&path, ONE_VEHICLE.replace("{X}", "700")).unwrap();

    let err = FileManager::new(&path).load().unwrap_err();
    assert!(matches!(err, StoreError::Vehicle { index: 1, .. }));
    assert_eq!(err.field(), Some("x"));

    let registry = VehicleRegistry::open_path(&path);
    assert!(registry.show().is_empty());
    assert!(registry.load_warning().unwrap().contains("700"));
}

#[test]
fn test_loaded_ids_are_kept_and_allocator_resynced() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("vehicles.xml");
    fs::write(&path, ONE_VEHICLE.replace("{X}", "-3.5")).unwrap();

    let mut registry = VehicleRegistry::open_path(&path);
    let loaded = &registry.show()[0];
    assert_eq!(loaded.id(), 4);
    assert_eq!(loaded.coordinates().x(), -3.5);
    assert_eq!(loaded.fuel_type(), None);
    assert_eq!(registry.collection().allocator().high_water(), 4);

    assert_eq!(registry.add(draft_x()).unwrap(), 5);
}

#[test]
fn test_largest_id_loads_but_add_reports_exhaustion() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("vehicles.xml");
    let top = ONE_VEHICLE
        .replace("{X}", "1.0")
        .replace("<id>4</id>", "<id>4294967295</id>");
    fs::write(&path, top).unwrap();

    let mut registry = VehicleRegistry::open_path(&path);
    assert!(registry.load_warning().is_none());
    assert_eq!(registry.show()[0].id(), u32::MAX);

    let err = registry.add(draft_x()).unwrap_err();
    assert_eq!(err.field, "id");
    assert_eq!(registry.show().len(), 1);
}

#[test]
fn test_one_bad_block_rejects_whole_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("vehicles.xml");
    let good = ONE_VEHICLE.replace("{X}", "1.0");
    let bad_block = "<vehicle><id>5</id><name></name></vehicle>";
    fs::write(&path, good.replace("</vehicles>", &format!("{bad_block}\n</vehicles>"))).unwrap();

    let registry = VehicleRegistry::open_path(&path);
    assert!(registry.show().is_empty());
    assert!(registry.load_warning().is_some());
}

#[test]
fn test_duplicate_ids_in_file_are_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("vehicles.xml");
    let block = ONE_VEHICLE.replace("{X}", "1.0");
    let start = block.find("  <vehicle>").unwrap();
    let end = block.find("</vehicles>").unwrap();
    let twice = format!("{}{}{}", &block[..end], &block[start..end], &block[end..]);
    fs::write(&path, twice).unwrap();

    let registry = VehicleRegistry::open_path(&path);
    assert!(registry.show().is_empty());
    assert!(registry.load_warning().unwrap().contains("duplicate"));
}

#[test]
fn test_missing_file_is_reported_as_io() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nope.xml");
    let err = FileManager::new(&path).load().unwrap_err();
    assert!(err.is_io());

    let registry = VehicleRegistry::open_path(&path);
    assert!(registry.show().is_empty());
    assert!(registry.load_warning().unwrap().contains("nope.xml"));
}

#[test]
fn test_save_then_load_repeatedly() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("vehicles.xml");
    let mut registry = VehicleRegistry::open_path(&path);
    registry.add(draft_x()).unwrap();
    registry
        .add(
            VehicleDraft::new("Y", Coordinates::new(1.0, 1).unwrap(), 1.0, 1.0, VehicleType::Hoverboard)
                .fuel_type(Some(FuelType::Manpower)),
        )
        .unwrap();

    for _ in 0..3 {
        registry.save().unwrap();
        assert_eq!(registry.reload().unwrap(), 2);
    }
    assert_eq!(registry.collection().ids(), vec![1, 2]);
}
