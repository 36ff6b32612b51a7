use std::io::Read;
use std::net::TcpListener;

use srp_bus_bridge::peer::MemoryBusPeer;
use srp_bus_bridge::{BridgeError, TcpConnector};
use srp_cpu_core::{CondFlags, CpuExit, CpuState, HelperConfig, Helpers, RotateCarry};

fn helpers_for(addr: std::net::SocketAddr, rotate_carry: RotateCarry) -> Helpers<TcpConnector> {
    Helpers::new(HelperConfig { rotate_carry }, TcpConnector::new(addr))
}

/// Minimal dispatch loop body: `cmp a, b; jb -> fault`.
fn compare_or_fault(
    helpers: &Helpers<TcpConnector>,
    cpu: &mut CpuState,
    a: u32,
    b: u32,
) -> Result<u32, CpuExit> {
    let diff = helpers.sub_cc(cpu, a, b);
    if cpu.flags.cf() {
        return Err(helpers.exception(cpu, 0x0D));
    }
    Ok(diff)
}

#[test]
fn alu_helpers_update_cpu_flags() {
    let helpers = helpers_for("127.0.0.1:9".parse().unwrap(), RotateCarry::default());
    let mut cpu = CpuState::new();

    assert_eq!(helpers.add_cc(&mut cpu, 0x7FFF_FFFF, 1), 0x8000_0000);
    assert_eq!(cpu.flags, CondFlags::SF | CondFlags::OF);

    helpers.logic_cc(&mut cpu, 0);
    assert_eq!(cpu.flags, CondFlags::ZF | CondFlags::OF);

    helpers.logic_zf(&mut cpu, 1);
    assert_eq!(cpu.flags, CondFlags::OF);

    assert_eq!(helpers.sub_cc(&mut cpu, 0, 1), 0xFFFF_FFFF);
    assert_eq!(cpu.flags, CondFlags::SF | CondFlags::CF);

    assert_eq!(helpers.rcl_cc(&mut cpu, 0), 1);
    assert!(!cpu.flags.cf());
    assert_eq!(helpers.rcr_cc(&mut cpu, 1), 0);
    assert!(cpu.flags.cf());
}

#[test]
fn rotate_helpers_follow_configured_carry_policy() {
    let addr = "127.0.0.1:9".parse().unwrap();

    let preserve = helpers_for(addr, RotateCarry::Preserve);
    let mut cpu = CpuState::new();
    assert_eq!(preserve.rol_cc(&mut cpu, 0x8000_0000), 1);
    assert_eq!(preserve.ror_cc(&mut cpu, 1), 0x8000_0000);
    assert_eq!(cpu.flags, CondFlags::empty());

    let update = helpers_for(addr, RotateCarry::Update);
    assert_eq!(update.rol_cc(&mut cpu, 0x8000_0000), 1);
    assert!(cpu.flags.cf());
    assert_eq!(update.ror_cc(&mut cpu, 2), 1);
    assert!(!cpu.flags.cf());
}

#[test]
fn fault_is_returned_to_the_dispatch_loop() {
    let helpers = helpers_for("127.0.0.1:9".parse().unwrap(), RotateCarry::default());
    let mut cpu = CpuState::new();

    assert_eq!(compare_or_fault(&helpers, &mut cpu, 5, 3).unwrap(), 2);
    assert_eq!(cpu.exception_index, None);

    let exit = compare_or_fault(&helpers, &mut cpu, 3, 5).unwrap_err();
    assert!(matches!(exit, CpuExit::Exception(0x0D)));
    assert!(!exit.is_fatal());
    assert_eq!(exit.exit_code(), None);
    assert_eq!(cpu.take_exception(), Some(0x0D));
}

#[test]
fn socket_helpers_round_trip_through_bus_peer() {
    let peer = MemoryBusPeer::bind("127.0.0.1:0").unwrap().spawn(2).unwrap();
    let mut helpers = helpers_for(peer.local_addr(), RotateCarry::default());

    helpers.socket_write(0x1000, 0xCAFE_BABE).unwrap();
    assert_eq!(helpers.socket_read(0x1000).unwrap(), 0xCAFE_BABE);
    peer.join().unwrap();
}

#[test]
fn socket_read_desync_surfaces_as_fatal_exit() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let peer = std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut buf = [0u8; 12];
        stream.read_exact(&mut buf).unwrap();
    });

    let mut helpers = helpers_for(addr, RotateCarry::default());
    let exit = helpers.socket_read(0x2000).unwrap_err();
    assert!(exit.is_fatal());
    assert_eq!(exit.exit_code(), Some(1));
    assert!(matches!(
        exit,
        CpuExit::Bus(BridgeError::ShortReply { received: 0, .. })
    ));
    peer.join().unwrap();
}
