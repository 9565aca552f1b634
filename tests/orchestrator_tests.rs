//! End-to-end packaging scenarios over real temporary trees.

use fonline_packager::packager::{Error, Packager, Settings, Target, ToolHomes};
use std::fs::File;
use std::path::Path;
use tempfile::TempDir;

const MARKER: &[u8] = b"###InternalConfig###";

/// Writes a placeholder binary embedding a reserved slot of `capacity` bytes.
fn write_binary_with_slot(path: &Path, capacity: usize) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut data = b"\x7fELF fake client ".to_vec();
    data.extend_from_slice(MARKER);
    data.extend_from_slice(capacity.to_string().as_bytes());
    data.push(0);
    data.extend(std::iter::repeat_n(b' ', capacity));
    data.extend_from_slice(b" .text .data");
    std::fs::write(path, data).unwrap();
}

/// A build tree with Linux binaries, one resource file, and a config.
fn linux_fixture(root: &Path, slot_capacity: usize) -> Settings {
    write_binary_with_slot(&root.join("Binaries/Linux/FOnline32"), slot_capacity);
    write_binary_with_slot(&root.join("Binaries/Linux/FOnline64"), slot_capacity);

    std::fs::create_dir_all(root.join("Resources")).unwrap();
    std::fs::write(root.join("Resources/readme.txt"), "hello").unwrap();

    std::fs::write(
        root.join("Config.cfg"),
        "# client config\nResolution 1024\n\n\nFullScreen 0\n",
    )
    .unwrap();

    Settings::new(
        "Game",
        root.join("Binaries"),
        root.join("Resources"),
        root.join("Config.cfg"),
        root.join("Output"),
        ToolHomes {
            java_home: root.join("jdk"),
            android_home: root.join("android"),
            emscripten_root: root.join("emscripten"),
        },
        Target::Linux,
    )
}

/// Slot content of `data` up to the first NUL after the size field.
fn slot_content(data: &[u8]) -> Vec<u8> {
    let marker = data
        .windows(MARKER.len())
        .position(|w| w == MARKER)
        .unwrap();
    let size_start = marker + MARKER.len();
    let size_end = size_start + data[size_start..].iter().position(|&b| b == 0).unwrap();
    let content = &data[size_end + 1..];
    content[..content.iter().position(|&b| b == 0).unwrap()].to_vec()
}

#[tokio::test]
async fn linux_run_produces_both_tarballs() {
    let dir = TempDir::new().unwrap();
    let settings = linux_fixture(dir.path(), 256);

    let out = Packager::new(settings).run().await.unwrap();
    assert_eq!(out, dir.path().join("Output/Linux"));

    assert!(out.join("Game.tar").is_file());
    assert!(out.join("Game.tar.gz").is_file());
    assert!(out.join("Game/Game32").is_file());
    assert!(out.join("Game/Game64").is_file());
    assert!(out.join("Game/Data/readme.txt").is_file());
}

#[tokio::test]
async fn linux_tarball_unpacks_to_a_named_game_folder() {
    let dir = TempDir::new().unwrap();
    let settings = linux_fixture(dir.path(), 256);
    let out = Packager::new(settings).run().await.unwrap();

    let unpack = dir.path().join("unpacked");
    let mut tar = tar::Archive::new(File::open(out.join("Game.tar")).unwrap());
    tar.unpack(&unpack).unwrap();

    assert!(unpack.join("Game/Game32").is_file());
    assert!(unpack.join("Game/Game64").is_file());
    assert_eq!(
        std::fs::read_to_string(unpack.join("Game/Data/readme.txt")).unwrap(),
        "hello"
    );

    let gz = flate2::read::GzDecoder::new(File::open(out.join("Game.tar.gz")).unwrap());
    let unpack_gz = dir.path().join("unpacked_gz");
    tar::Archive::new(gz).unpack(&unpack_gz).unwrap();
    assert!(unpack_gz.join("Game/Data/readme.txt").is_file());
}

#[tokio::test]
async fn packaged_binaries_carry_the_sanitized_config() {
    let dir = TempDir::new().unwrap();
    let settings = linux_fixture(dir.path(), 256);
    let out = Packager::new(settings).run().await.unwrap();

    let expected = b"\nResolution 1024\nFullScreen 0\n".to_vec();
    for bin in ["Game/Game32", "Game/Game64"] {
        let data = std::fs::read(out.join(bin)).unwrap();
        assert_eq!(slot_content(&data), expected, "{}", bin);
    }
}

#[tokio::test]
async fn undersized_slot_fails_and_removes_the_output_directory() {
    let dir = TempDir::new().unwrap();
    let settings = linux_fixture(dir.path(), 4);

    let err = Packager::new(settings).run().await.unwrap_err();
    assert!(matches!(err, Error::ConfigTooLarge { capacity: 4, .. }));
    assert!(!dir.path().join("Output/Linux").exists());
}

#[tokio::test]
async fn rerun_discards_stale_output() {
    let dir = TempDir::new().unwrap();
    let settings = linux_fixture(dir.path(), 256);

    Packager::new(settings.clone()).run().await.unwrap();
    let stale = dir.path().join("Output/Linux/leftover.txt");
    std::fs::write(&stale, "stale").unwrap();

    Packager::new(settings).run().await.unwrap();
    assert!(!stale.exists());
    assert!(dir.path().join("Output/Linux/Game.tar").is_file());
}

#[tokio::test]
async fn missing_binaries_fail_and_leave_no_output() {
    let dir = TempDir::new().unwrap();
    let settings = linux_fixture(dir.path(), 256);
    std::fs::remove_file(dir.path().join("Binaries/Linux/FOnline64")).unwrap();

    Packager::new(settings).run().await.unwrap_err();
    assert!(!dir.path().join("Output/Linux").exists());
}

#[cfg(not(windows))]
#[tokio::test]
async fn windows_run_zips_and_stages_binaries() {
    let dir = TempDir::new().unwrap();
    let settings = linux_fixture(dir.path(), 256);
    write_binary_with_slot(&dir.path().join("Binaries/Windows/FOnline.exe"), 256);
    std::fs::write(dir.path().join("Binaries/Windows/FOnline.pdb"), "symbols").unwrap();

    let settings = Settings::new(
        settings.game_name(),
        settings.binaries_dir(),
        settings.resources_dir(),
        settings.config_path(),
        settings.output_dir(),
        settings.tool_homes().clone(),
        Target::Windows,
    );

    let out = Packager::new(settings).run().await.unwrap();
    assert!(out.join("Game/Game.exe").is_file());
    assert!(out.join("Game/Game.pdb").is_file());

    // The zip holds the whole game directory tree.
    let mut zip = zip::ZipArchive::new(File::open(out.join("Game.zip")).unwrap()).unwrap();
    let names: Vec<String> = (0..zip.len())
        .map(|i| zip.by_index(i).unwrap().name().to_string())
        .collect();
    assert!(names.contains(&"Game.exe".to_string()));
    assert!(names.contains(&"Data/readme.txt".to_string()));

    // Side channel: final binaries staged next to the resources tree.
    let staging = dir.path().join("Resources/../Binaries");
    assert!(staging.join("Game.exe").is_file());
    assert!(staging.join("Game.pdb").is_file());
}

#[tokio::test]
async fn mac_run_packages_the_single_binary() {
    let dir = TempDir::new().unwrap();
    let settings = linux_fixture(dir.path(), 256);
    write_binary_with_slot(&dir.path().join("Binaries/Mac/FOnline"), 256);

    let settings = Settings::new(
        settings.game_name(),
        settings.binaries_dir(),
        settings.resources_dir(),
        settings.config_path(),
        settings.output_dir(),
        settings.tool_homes().clone(),
        Target::Mac,
    );

    let out = Packager::new(settings).run().await.unwrap();
    assert!(out.join("Game/Game").is_file());
    assert!(out.join("Game/Data/readme.txt").is_file());
    assert!(out.join("Game.tar").is_file());
    assert!(out.join("Game.tar.gz").is_file());

    let data = std::fs::read(out.join("Game/Game")).unwrap();
    assert_eq!(slot_content(&data), b"\nResolution 1024\nFullScreen 0\n");
}
