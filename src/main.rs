#![no_std]
#![no_main]

//! BoxLab status display firmware entry point.
//!
//! Hardware connection LCD -> ESP32-C3:
//! RST --------> GPIO2
//! CE (CS) ----> GPIO10
//! DC ---------> GPIO3
//! DIN (MOSI) -> GPIO7
//! CLK (SCK) --> GPIO6
//! VCC --------> 3V3
//! GND --------> GND
//!
//! Builtin LED (GPIO8, active low) indicates status:
//! - Off:                    powered off
//! - On:                     initializing or WiFi FAIL
//! - Blinking slowly (1 Hz): everything OK
//! - Blinking fast (10 Hz):  Internet or server FAIL

use core::fmt::Write as _;

use embassy_net::dns::DnsSocket;
use embassy_net::tcp::client::TcpClient;
use embassy_net::{Config, Stack, StackResources};
use esp_hal::Blocking;
use esp_hal::clock::CpuClock;
use esp_hal::delay::Delay;
use esp_hal::gpio::{Level, Output, OutputConfig};
use esp_hal::rng::Rng;
use esp_hal::spi::Mode;
use esp_hal::spi::master::{Config as SpiConfig, Spi};
use esp_hal::time::Rate;
use esp_hal::timer::timg::TimerGroup;
use esp_hal_embassy::Executor;
use esp_println::println;
use esp_wifi::wifi;
use static_cell::StaticCell;

extern crate alloc;

use status_display_rs::display::{self, Pcd8544};
use status_display_rs::led::{self, StatusLed, StatusMutex};
use status_display_rs::probe::{
    ProbeTcpState, Prober, RX_BUF_SIZE, TLS_READ_BUF_SIZE, TLS_WRITE_BUF_SIZE,
};
use status_display_rs::status::{ProbeStatus, StatusReport};
use status_display_rs::wifi::WifiManager;
use status_display_rs::{VERSION, config};

// Add app descriptor for espflash compatibility
esp_bootloader_esp_idf::esp_app_desc!();

// Concrete LCD driver type: SPI2 plus DC / CE / RST outputs
type StatusLcd = Pcd8544<Spi<'static, Blocking>, Output<'static>, Output<'static>, Output<'static>>;

// Static cells for embassy components
static WIFI_INIT_CELL: StaticCell<esp_wifi::EspWifiController<'static>> = StaticCell::new();
static WIFI_MANAGER_CELL: StaticCell<WifiManager<'static>> = StaticCell::new();
static STATUS_CELL: StaticCell<StatusMutex> = StaticCell::new();
static TCP_STATE_CELL: StaticCell<ProbeTcpState> = StaticCell::new();
static TLS_READ_CELL: StaticCell<[u8; TLS_READ_BUF_SIZE]> = StaticCell::new();
static TLS_WRITE_CELL: StaticCell<[u8; TLS_WRITE_BUF_SIZE]> = StaticCell::new();
static RX_BUF_CELL: StaticCell<[u8; RX_BUF_SIZE]> = StaticCell::new();

// Static executor for embassy tasks
static EXECUTOR: StaticCell<Executor> = StaticCell::new();

#[panic_handler]
fn panic(_: &core::panic::PanicInfo) -> ! {
    loop {}
}

// Embassy task to run the network stack
#[embassy_executor::task]
async fn net_task(
    mut runner: embassy_net::Runner<'static, esp_wifi::wifi::WifiDevice<'static>>,
) -> ! {
    runner.run().await
}

/// Update both output sinks from the shared report: redraw the LCD status
/// screen and emit one serial status line.
async fn render(lcd: &mut StatusLcd, report: &'static StatusMutex) {
    let snapshot = *report.lock().await;

    let _ = display::draw_status_screen(lcd, &snapshot);
    if lcd.flush().is_err() {
        println!("[LCD] Display update failed");
    }

    let mut line: heapless::String<128> = heapless::String::new();
    let _ = write!(
        line,
        "Version: {}, Time: {}, TTL: {}, WiFi: {}, Internet: {}, Server: {}",
        VERSION,
        embassy_time::Instant::now().as_millis(),
        config::CHECK_TTL_MS,
        snapshot.wifi.label(),
        snapshot.internet.label(),
        snapshot.server.label(),
    );
    println!("{}", line);
}

/// The periodic check loop: reconnect WiFi if needed, probe both HTTP
/// targets, and render after every sub-step so the screen updates
/// progressively within a cycle.
#[embassy_executor::task]
async fn status_task(
    stack: Stack<'static>,
    wifi: &'static mut WifiManager<'static>,
    mut lcd: StatusLcd,
    report: &'static StatusMutex,
    tls_seed: u64,
    tls_read_buf: &'static mut [u8],
    tls_write_buf: &'static mut [u8],
    rx_buf: &'static mut [u8],
    tcp_state: &'static ProbeTcpState,
) -> ! {
    let mut delay = Delay::new();

    match lcd.init(&mut delay, config::LCD_CONTRAST) {
        Ok(()) => println!("# Display init result: OK"),
        Err(_) => println!("# Display init result: FAIL"),
    }

    let _ = display::draw_splash(&mut lcd);
    if lcd.flush().is_err() {
        println!("[LCD] Splash render failed");
    }
    embassy_time::Timer::after(embassy_time::Duration::from_millis(config::SPLASH_HOLD_MS)).await;
    println!("# Initialization done");

    let tcp_client = TcpClient::new(stack, tcp_state);
    let dns_socket = DnsSocket::new(stack);
    let mut prober = Prober::new(
        &tcp_client,
        &dns_socket,
        tls_seed,
        tls_read_buf,
        tls_write_buf,
        rx_buf,
    );

    let mut ticker =
        embassy_time::Ticker::every(embassy_time::Duration::from_millis(config::CHECK_INTERVAL_MS));

    loop {
        if !wifi.is_connected() {
            println!(
                "[WIFI] WiFi not connected, connecting to {}...",
                config::WIFI_SSID
            );
            report.lock().await.wifi_lost();
            render(&mut lcd, report).await;

            // Retry forever; redraw the status screen between polls so the
            // panel keeps showing "WiFi: ..." while we wait.
            let mut polls: u32 = 0;
            loop {
                if polls % config::WIFI_RETRY_POLLS == 0
                    && wifi
                        .start_connect(config::WIFI_SSID, config::WIFI_PASSWORD)
                        .await
                        .is_err()
                {
                    println!("[WIFI] Connect request failed, will retry");
                }
                embassy_time::Timer::after(embassy_time::Duration::from_millis(
                    config::WIFI_RENDER_INTERVAL_MS,
                ))
                .await;
                render(&mut lcd, report).await;
                if wifi.is_connected() {
                    break;
                }
                polls += 1;
            }
            wifi.wait_for_ip().await;
        }

        report.lock().await.wifi = ProbeStatus::Ok;
        render(&mut lcd, report).await;

        let internet = prober.probe(config::INTERNET_PROBE_URL).await;
        report.lock().await.internet = internet;
        render(&mut lcd, report).await;

        let server = prober.probe(config::SERVER_PROBE_URL).await;
        report.lock().await.server = server;
        render(&mut lcd, report).await;

        ticker.next().await;
    }
}

#[esp_hal::main]
fn main() -> ! {
    let hal_config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(hal_config);

    // Heap allocator for the WiFi blob (72KB)
    esp_alloc::heap_allocator!(size: 72 * 1024);

    // Embassy time system
    let timer_group0 = TimerGroup::new(peripherals.TIMG0);
    esp_hal_embassy::init(timer_group0.timer0);

    println!("# LazyHorse.net BoxLab Status Display");
    println!("# Version {}", VERSION);
    println!("# Initializing...");

    // WiFi driver
    let timer_group1 = TimerGroup::new(peripherals.TIMG1);
    let mut rng = Rng::new(peripherals.RNG);
    let tls_seed = ((rng.random() as u64) << 32) | rng.random() as u64;
    let net_seed = ((rng.random() as u64) << 32) | rng.random() as u64;
    let wifi_init = esp_wifi::init(timer_group1.timer0, rng, peripherals.RADIO_CLK).unwrap();
    let wifi_init_ref = WIFI_INIT_CELL.init(wifi_init);

    let (wifi_controller, wifi_interfaces) = wifi::new(wifi_init_ref, peripherals.WIFI).unwrap();
    let wifi_device = wifi_interfaces.sta;
    println!("[WIFI] WiFi controller and device created successfully");

    // Embassy-net stack with DHCP configuration
    static STACK_RESOURCES: StaticCell<StackResources<4>> = StaticCell::new();
    let stack_resources = STACK_RESOURCES.init(StackResources::new());
    let net_config = Config::dhcpv4(Default::default());
    let (stack, runner) = embassy_net::new(wifi_device, net_config, stack_resources, net_seed);
    println!("[WIFI] Embassy-net stack created with DHCP configuration");

    let wifi_manager = WIFI_MANAGER_CELL.init(WifiManager::new(wifi_controller, stack));

    // LCD on SPI2, 4 MHz, mode 0
    let spi = Spi::new(
        peripherals.SPI2,
        SpiConfig::default()
            .with_frequency(Rate::from_mhz(4))
            .with_mode(Mode::_0),
    )
    .unwrap()
    .with_sck(peripherals.GPIO6)
    .with_mosi(peripherals.GPIO7);

    let dc = Output::new(peripherals.GPIO3, Level::Low, OutputConfig::default());
    let ce = Output::new(peripherals.GPIO10, Level::High, OutputConfig::default());
    let rst = Output::new(peripherals.GPIO2, Level::High, OutputConfig::default());
    let lcd = Pcd8544::new(spi, dc, ce, rst);

    // Builtin LED, turned on (active low) for the initialization phase
    let led_pin = Output::new(peripherals.GPIO8, Level::Low, OutputConfig::default());
    let status_led = StatusLed::new(led_pin);

    // Shared status report and probe buffers
    let status_ref: &'static StatusMutex =
        STATUS_CELL.init(embassy_sync::mutex::Mutex::new(StatusReport::new()));
    let tcp_state: &'static ProbeTcpState = TCP_STATE_CELL.init(ProbeTcpState::new());
    let tls_read_buf = TLS_READ_CELL.init_with(|| [0; TLS_READ_BUF_SIZE]);
    let tls_write_buf = TLS_WRITE_CELL.init_with(|| [0; TLS_WRITE_BUF_SIZE]);
    let rx_buf = RX_BUF_CELL.init_with(|| [0; RX_BUF_SIZE]);

    // Initialize embassy executor and run tasks
    let executor = EXECUTOR.init(Executor::new());
    executor.run(|spawner| {
        println!("[MAIN] Spawning network task...");
        spawner.spawn(net_task(runner)).ok();

        println!("[MAIN] Spawning LED task...");
        spawner.spawn(led::led_task(status_led, status_ref)).ok();

        println!("[MAIN] Spawning status task...");
        spawner
            .spawn(status_task(
                stack,
                wifi_manager,
                lcd,
                status_ref,
                tls_seed,
                tls_read_buf,
                tls_write_buf,
                rx_buf,
                tcp_state,
            ))
            .ok();
    });
}
