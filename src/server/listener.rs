// Listener module
// Creates the TCP listener via socket2 so socket options are explicit

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::TcpListener;

/// Create a `TcpListener` bound to `addr`.
///
/// `SO_REUSEADDR` lets the process rebind a port still in `TIME_WAIT`
/// after a quick restart; `SO_REUSEPORT` allows several processes to
/// share the port behind the kernel's accept balancing.
pub fn bind_listener(addr: std::net::SocketAddr) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;

    socket.set_reuse_port(true)?;
    socket.set_reuse_address(true)?;

    // Non-blocking mode for async compatibility
    socket.set_nonblocking(true)?;

    socket.bind(&addr.into())?;
    socket.listen(128)?;

    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}
