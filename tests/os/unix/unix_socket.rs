use crate::{
    hostname,
    os::unix::{UnixSocket, UnixSocketFactory},
    resolve::ResolvedAddr,
    socket::{FileSocket, SocketFactory},
    tests::util::*,
};
use color_eyre::eyre::{ensure, Context};
use std::{
    io::{self, Read, Write},
    thread,
    time::Duration,
};

#[test]
fn connect_rejects_real_addresses() -> TestResult {
    testinit();
    let mut socket = UnixSocketFactory.create_socket();
    let addr = ResolvedAddr::Inet("127.0.0.1:80".parse()?);
    let e = socket.connect(&addr, None).unwrap_err();
    ensure_eq!(e.kind(), io::ErrorKind::InvalidInput);
    ensure_eq!(socket.is_connected(), false);
    Ok(())
}

#[test]
fn connect_to_missing_path_fails_once() -> TestResult {
    testinit();
    let addr = ResolvedAddr::from_path("/tmp/filesocket-test-no-such-socket.sock")?;
    let mut socket = UnixSocketFactory.create_socket();
    ensure!(socket.connect(&addr, Some(Duration::from_secs(1))).is_err(), "connect should fail");
    ensure_eq!(socket.is_connected(), false);
    Ok(())
}

#[test]
fn close_is_idempotent() -> TestResult {
    testinit();
    let mut socket = UnixSocketFactory.create_socket();
    socket.close()?;
    socket.close()?;
    ensure!(socket.is_closed(), "socket should report closed");
    Ok(())
}

#[test]
fn stream_accessors_require_connect() -> TestResult {
    testinit();
    let socket = UnixSocketFactory.create_socket();
    ensure_eq!(socket.recv_half().unwrap_err().kind(), io::ErrorKind::NotConnected);
    ensure_eq!(socket.send_half().unwrap_err().kind(), io::ErrorKind::NotConnected);
    Ok(())
}

#[test]
fn unsupported_creation_shortcuts_fail() -> TestResult {
    testinit();
    let factory = UnixSocketFactory;
    let e = factory.connect_host("localhost", 80).unwrap_err();
    ensure_eq!(e.kind(), io::ErrorKind::Unsupported);
    let e = factory.connect_resolved("127.0.0.1:80".parse()?).unwrap_err();
    ensure_eq!(e.kind(), io::ErrorKind::Unsupported);
    Ok(())
}

#[test]
fn echo_round_trip_through_encoded_hostname() -> TestResult {
    testinit();
    let path = temp_sock_path("echo");
    let _ = std::fs::remove_file(&path);

    let hostname = hostname::encode_hostname(&path)?;
    let listener = UnixSocket::bind(&ResolvedAddr::Tunneled(hostname.clone()))?;
    let server = thread::spawn(move || -> TestResult {
        let (mut conn, _) = listener.accept().context("accept failed")?;
        let mut buf = [0; 5];
        conn.read_exact(&mut buf).context("server receive failed")?;
        conn.write_all(&buf).context("server send failed")?;
        Ok(())
    });

    let factory = UnixSocketFactory;
    let addrs = factory.lookup(&hostname, 0)?;
    ensure_eq!(addrs.len(), 1);
    let mut socket = factory.create_socket();
    socket.connect(&addrs[0], Some(Duration::from_secs(5)))?;
    ensure!(socket.is_connected(), "socket should report connected");

    socket.write_all(b"hello").context("client send failed")?;
    let mut buf = [0; 5];
    socket.read_exact(&mut buf).context("client receive failed")?;
    ensure_eq!(&buf, b"hello");

    socket.close()?;
    ensure!(socket.is_closed(), "socket should report closed");
    ensure_eq!(socket.is_connected(), false);

    server.join().expect("server thread panicked")?;
    let _ = std::fs::remove_file(&path);
    Ok(())
}

#[test]
fn connect_timeout_becomes_the_read_timeout() -> TestResult {
    testinit();
    let path = temp_sock_path("read-timeout");
    let _ = std::fs::remove_file(&path);

    let addr = ResolvedAddr::from_path(&path)?;
    let listener = UnixSocket::bind(&addr)?;
    let server = thread::spawn(move || -> TestResult {
        // Accept and go quiet; the client's read has to time out on its own.
        let (conn, _) = listener.accept().context("accept failed")?;
        thread::sleep(Duration::from_millis(500));
        drop(conn);
        Ok(())
    });

    let mut socket = UnixSocketFactory.create_socket();
    socket.connect(&addr, Some(Duration::from_millis(100)))?;
    let mut buf = [0; 1];
    let e = socket.read(&mut buf).unwrap_err();
    ensure!(
        matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut),
        "expected a timeout-flavored error, got {e:?}"
    );

    server.join().expect("server thread panicked")?;
    let _ = std::fs::remove_file(&path);
    Ok(())
}

#[test]
fn halves_share_the_connection() -> TestResult {
    testinit();
    let path = temp_sock_path("halves");
    let _ = std::fs::remove_file(&path);

    let addr = ResolvedAddr::from_path(&path)?;
    let listener = UnixSocket::bind(&addr)?;
    let server = thread::spawn(move || -> TestResult {
        let (mut conn, _) = listener.accept().context("accept failed")?;
        let mut buf = [0; 4];
        conn.read_exact(&mut buf).context("server receive failed")?;
        conn.write_all(&buf).context("server send failed")?;
        Ok(())
    });

    let mut socket = UnixSocketFactory.create_socket();
    socket.connect(&addr, None)?;
    let mut recv = socket.recv_half()?;
    let mut send = socket.send_half()?;
    send.write_all(b"ping").context("half send failed")?;
    let mut buf = [0; 4];
    recv.read_exact(&mut buf).context("half receive failed")?;
    ensure_eq!(&buf, b"ping");

    server.join().expect("server thread panicked")?;
    let _ = std::fs::remove_file(&path);
    Ok(())
}
