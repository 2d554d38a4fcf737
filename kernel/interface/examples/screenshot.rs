#[cfg(windows)]
pub fn main() -> anyhow::Result<()> {
    use kmon_driver_interface::KernelInterface;

    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .parse_default_env()
        .init();

    let interface = KernelInterface::create_from_env()?;

    let winsta = interface.open_window_station("WinSta0")?;
    println!("Window station: {:?} ({:X})", winsta.handle, winsta.error);

    let desktop = interface.open_desktop(winsta.handle, "Default")?;
    println!("Desktop: {:?} ({:X})", desktop.handle, desktop.error);

    let screenshot = interface.screenshot(desktop.handle)?;
    println!(
        "Screenshot: {}x{}@{} ({} bytes, {:X})",
        screenshot.width,
        screenshot.height,
        screenshot.bits_per_pixel,
        screenshot.data_size,
        screenshot.error
    );
    Ok(())
}

#[cfg(not(windows))]
pub fn main() {
    eprintln!("The KMON driver is only available on Windows.");
}
