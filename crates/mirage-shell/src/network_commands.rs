//! Network utilities, fully simulated.
//!
//! Nothing here opens a socket. Hosts resolve to deterministic fake
//! addresses derived from an FNV-1a hash of the hostname, so repeated
//! calls (and tests) always see the same topology.

use mirage_types::{Category, Result, ShellError};

use crate::interpreter::{Command, ShellCtx, first_operand, flag_number};

/// FNV-1a over the hostname; the basis for every derived fake value.
fn fnv1a(input: &str) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in input.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

/// Deterministic public-looking IPv4 for a hostname.
fn fake_ip(host: &str) -> String {
    let h = fnv1a(host);
    // First octet pinned away from reserved ranges.
    let a = 13 + (h % 180) as u8;
    let b = (h >> 8) as u8;
    let c = (h >> 16) as u8;
    let d = 1 + ((h >> 24) % 254) as u8;
    format!("{a}.{b}.{c}.{d}")
}

/// Deterministic base round-trip time in tenths of a millisecond.
fn base_rtt_tenths(host: &str) -> u64 {
    100 + fnv1a(host) % 400
}

// ---------------------------------------------------------------------------
// ping
// ---------------------------------------------------------------------------

struct PingCmd;
impl Command for PingCmd {
    fn name(&self) -> &'static str {
        "ping"
    }
    fn description(&self) -> &'static str {
        "Send ICMP echo requests (simulated)"
    }
    fn usage(&self) -> &'static str {
        "ping [-c count] <host>"
    }
    fn category(&self) -> Category {
        Category::Network
    }
    fn examples(&self) -> &'static [&'static str] {
        &["ping google.com", "ping -c 2 example.org"]
    }
    fn execute(&self, args: &[&str], _ctx: &mut ShellCtx<'_>) -> Result<String> {
        let host =
            first_operand(args, &["-c"]).ok_or_else(|| ShellError::Usage("ping [-c count] <host>".into()))?;
        let count = flag_number(args, "-c", 4).clamp(1, 20) as u64;
        let ip = fake_ip(host);
        let base = base_rtt_tenths(host);

        let mut lines = vec![format!("PING {host} ({ip}) 56(84) bytes of data.")];
        let mut total = 0u64;
        let mut min = u64::MAX;
        let mut max = 0u64;
        for seq in 1..=count {
            // Small per-sequence wobble keeps the trace plausible.
            let rtt = base + (fnv1a(&format!("{host}/{seq}")) % 60);
            total += rtt;
            min = min.min(rtt);
            max = max.max(rtt);
            lines.push(format!(
                "64 bytes from {ip}: icmp_seq={seq} ttl=117 time={}.{} ms",
                rtt / 10,
                rtt % 10
            ));
        }
        let avg = total / count;
        lines.push(String::new());
        lines.push(format!("--- {host} ping statistics ---"));
        lines.push(format!(
            "{count} packets transmitted, {count} received, 0% packet loss, time {}ms",
            (count - 1) * 1000
        ));
        lines.push(format!(
            "rtt min/avg/max/mdev = {}.{}/{}.{}/{}.{}/0.{} ms",
            min / 10,
            min % 10,
            avg / 10,
            avg % 10,
            max / 10,
            max % 10,
            (max - min) / 2
        ));
        Ok(lines.join("\n"))
    }
}

// ---------------------------------------------------------------------------
// curl / wget
// ---------------------------------------------------------------------------

fn host_of(url: &str) -> &str {
    let stripped = url
        .trim_start_matches("https://")
        .trim_start_matches("http://");
    stripped.split('/').next().unwrap_or(stripped)
}

struct CurlCmd;
impl Command for CurlCmd {
    fn name(&self) -> &'static str {
        "curl"
    }
    fn description(&self) -> &'static str {
        "Transfer data from a URL (simulated)"
    }
    fn usage(&self) -> &'static str {
        "curl [-I] <url>"
    }
    fn category(&self) -> Category {
        Category::Network
    }
    fn examples(&self) -> &'static [&'static str] {
        &["curl https://example.com", "curl -I https://example.com"]
    }
    fn execute(&self, args: &[&str], _ctx: &mut ShellCtx<'_>) -> Result<String> {
        let url = first_operand(args, &["-H", "-X", "-d", "-o"])
            .ok_or_else(|| ShellError::Message("curl: no URL specified".into()))?;
        let host = host_of(url);
        let body_len = 1256 + fnv1a(host) % 4096;
        if args.contains(&"-I") || args.contains(&"--head") {
            return Ok(format!(
                "HTTP/2 200\ncontent-type: text/html; charset=UTF-8\ncontent-length: {body_len}\nserver: nginx/1.24.0\ncache-control: max-age=3600"
            ));
        }
        Ok(format!(
            "<!DOCTYPE html>\n<html>\n<head><title>{host}</title></head>\n<body>\n<h1>Welcome to {host}</h1>\n<p>This content is simulated.</p>\n</body>\n</html>"
        ))
    }
}

struct WgetCmd;
impl Command for WgetCmd {
    fn name(&self) -> &'static str {
        "wget"
    }
    fn description(&self) -> &'static str {
        "Download a file from a URL (simulated)"
    }
    fn usage(&self) -> &'static str {
        "wget <url>"
    }
    fn category(&self) -> Category {
        Category::Network
    }
    fn execute(&self, args: &[&str], _ctx: &mut ShellCtx<'_>) -> Result<String> {
        let url = first_operand(args, &["-O"])
            .ok_or_else(|| ShellError::Usage("wget <url>".into()))?;
        let host = host_of(url);
        let ip = fake_ip(host);
        let size = 10_240 + fnv1a(url) % 500_000;
        let file = url.rsplit('/').next().filter(|f| !f.is_empty() && *f != host).unwrap_or("index.html");
        Ok(format!(
            "Resolving {host} ({ip})...\nConnecting to {host} ({ip}):443... connected.\nHTTP request sent, awaiting response... 200 OK\nLength: {size} ({}K) [application/octet-stream]\nSaving to: '{file}'\n\n{file}    100%[===================>]  {}K  --.-KB/s    in 0.4s\n\n'{file}' saved [{size}/{size}]",
            size / 1024,
            size / 1024
        ))
    }
}

// ---------------------------------------------------------------------------
// netstat / ss
// ---------------------------------------------------------------------------

const LISTEN_TABLE: &str = "\
Proto Recv-Q Send-Q Local Address           Foreign Address         State
tcp        0      0 0.0.0.0:22              0.0.0.0:*               LISTEN
tcp        0      0 127.0.0.1:5432          0.0.0.0:*               LISTEN
tcp        0      0 0.0.0.0:80              0.0.0.0:*               LISTEN
tcp        0      0 0.0.0.0:443             0.0.0.0:*               LISTEN
tcp        0      0 10.0.2.15:22            10.0.2.2:51424          ESTABLISHED";

struct NetstatCmd;
impl Command for NetstatCmd {
    fn name(&self) -> &'static str {
        "netstat"
    }
    fn description(&self) -> &'static str {
        "Show network connections (simulated)"
    }
    fn usage(&self) -> &'static str {
        "netstat [-tulpn]"
    }
    fn category(&self) -> Category {
        Category::Network
    }
    fn execute(&self, _args: &[&str], _ctx: &mut ShellCtx<'_>) -> Result<String> {
        Ok(format!("Active Internet connections (servers and established)\n{LISTEN_TABLE}"))
    }
}

struct SsCmd;
impl Command for SsCmd {
    fn name(&self) -> &'static str {
        "ss"
    }
    fn description(&self) -> &'static str {
        "Show socket statistics (simulated)"
    }
    fn usage(&self) -> &'static str {
        "ss [-tulpn]"
    }
    fn category(&self) -> Category {
        Category::Network
    }
    fn execute(&self, _args: &[&str], _ctx: &mut ShellCtx<'_>) -> Result<String> {
        Ok("State      Recv-Q Send-Q Local Address:Port    Peer Address:Port\nLISTEN     0      128    0.0.0.0:22            0.0.0.0:*\nLISTEN     0      244    127.0.0.1:5432        0.0.0.0:*\nLISTEN     0      511    0.0.0.0:80            0.0.0.0:*\nESTAB      0      0      10.0.2.15:22          10.0.2.2:51424".to_string())
    }
}

// ---------------------------------------------------------------------------
// traceroute
// ---------------------------------------------------------------------------

struct TracerouteCmd;
impl Command for TracerouteCmd {
    fn name(&self) -> &'static str {
        "traceroute"
    }
    fn description(&self) -> &'static str {
        "Trace the route to a host (simulated)"
    }
    fn usage(&self) -> &'static str {
        "traceroute <host>"
    }
    fn category(&self) -> Category {
        Category::Network
    }
    fn execute(&self, args: &[&str], _ctx: &mut ShellCtx<'_>) -> Result<String> {
        let host = first_operand(args, &[])
            .ok_or_else(|| ShellError::Usage("traceroute <host>".into()))?;
        let ip = fake_ip(host);
        let mut lines = vec![format!(
            "traceroute to {host} ({ip}), 30 hops max, 60 byte packets"
        )];
        let hops = [
            ("_gateway", "10.0.2.2"),
            ("isp-edge.net", "100.64.12.1"),
            ("core1.transit.net", "198.51.100.34"),
        ];
        for (i, (name, hop_ip)) in hops.iter().enumerate() {
            let rtt = base_rtt_tenths(name) / 2 + (i as u64) * 40;
            lines.push(format!(
                " {} {name} ({hop_ip})  {}.{} ms",
                i + 1,
                rtt / 10,
                rtt % 10
            ));
        }
        let final_rtt = base_rtt_tenths(host);
        lines.push(format!(
            " 4 {host} ({ip})  {}.{} ms",
            final_rtt / 10,
            final_rtt % 10
        ));
        Ok(lines.join("\n"))
    }
}

// ---------------------------------------------------------------------------
// DNS: nslookup / dig / host
// ---------------------------------------------------------------------------

struct NslookupCmd;
impl Command for NslookupCmd {
    fn name(&self) -> &'static str {
        "nslookup"
    }
    fn description(&self) -> &'static str {
        "Query DNS records (simulated)"
    }
    fn usage(&self) -> &'static str {
        "nslookup <host>"
    }
    fn category(&self) -> Category {
        Category::Network
    }
    fn execute(&self, args: &[&str], _ctx: &mut ShellCtx<'_>) -> Result<String> {
        let host = first_operand(args, &[])
            .ok_or_else(|| ShellError::Usage("nslookup <host>".into()))?;
        let ip = fake_ip(host);
        Ok(format!(
            "Server:\t\t127.0.0.53\nAddress:\t127.0.0.53#53\n\nNon-authoritative answer:\nName:\t{host}\nAddress: {ip}"
        ))
    }
}

struct DigCmd;
impl Command for DigCmd {
    fn name(&self) -> &'static str {
        "dig"
    }
    fn description(&self) -> &'static str {
        "DNS lookup utility (simulated)"
    }
    fn usage(&self) -> &'static str {
        "dig <host>"
    }
    fn category(&self) -> Category {
        Category::Network
    }
    fn execute(&self, args: &[&str], _ctx: &mut ShellCtx<'_>) -> Result<String> {
        // `+short` style options are not dash flags, filter them here.
        let host = args
            .iter()
            .find(|a| !a.is_empty() && !a.starts_with('-') && !a.starts_with('+'))
            .copied()
            .ok_or_else(|| ShellError::Usage("dig <host>".into()))?;
        let ip = fake_ip(host);
        if args.contains(&"+short") {
            return Ok(ip);
        }
        Ok(format!(
            ";; ANSWER SECTION:\n{host}.\t\t300\tIN\tA\t{ip}\n\n;; Query time: {} msec\n;; SERVER: 127.0.0.53#53(127.0.0.53)",
            base_rtt_tenths(host) / 10
        ))
    }
}

struct HostCmd;
impl Command for HostCmd {
    fn name(&self) -> &'static str {
        "host"
    }
    fn description(&self) -> &'static str {
        "DNS lookup (simulated)"
    }
    fn usage(&self) -> &'static str {
        "host <name>"
    }
    fn category(&self) -> Category {
        Category::Network
    }
    fn execute(&self, args: &[&str], _ctx: &mut ShellCtx<'_>) -> Result<String> {
        let host = first_operand(args, &[])
            .ok_or_else(|| ShellError::Usage("host <name>".into()))?;
        Ok(format!("{host} has address {}", fake_ip(host)))
    }
}

// ---------------------------------------------------------------------------
// Interfaces: ifconfig / ip / arp / route
// ---------------------------------------------------------------------------

const ETH0: &str = "\
eth0: flags=4163<UP,BROADCAST,RUNNING,MULTICAST>  mtu 1500
        inet 10.0.2.15  netmask 255.255.255.0  broadcast 10.0.2.255
        ether 52:54:00:12:34:56  txqueuelen 1000  (Ethernet)
        RX packets 184223  bytes 241020344 (241.0 MB)
        TX packets 92110  bytes 8232144 (8.2 MB)

lo: flags=73<UP,LOOPBACK,RUNNING>  mtu 65536
        inet 127.0.0.1  netmask 255.0.0.0
        loop  txqueuelen 1000  (Local Loopback)";

struct IfconfigCmd;
impl Command for IfconfigCmd {
    fn name(&self) -> &'static str {
        "ifconfig"
    }
    fn description(&self) -> &'static str {
        "Show network interfaces (simulated)"
    }
    fn usage(&self) -> &'static str {
        "ifconfig"
    }
    fn category(&self) -> Category {
        Category::Network
    }
    fn execute(&self, _args: &[&str], _ctx: &mut ShellCtx<'_>) -> Result<String> {
        Ok(ETH0.to_string())
    }
}

struct IpCmd;
impl Command for IpCmd {
    fn name(&self) -> &'static str {
        "ip"
    }
    fn description(&self) -> &'static str {
        "Show addresses and routes (simulated)"
    }
    fn usage(&self) -> &'static str {
        "ip [addr|route]"
    }
    fn category(&self) -> Category {
        Category::Network
    }
    fn execute(&self, args: &[&str], _ctx: &mut ShellCtx<'_>) -> Result<String> {
        if args.first() == Some(&"route") {
            return Ok("default via 10.0.2.2 dev eth0 proto dhcp metric 100\n10.0.2.0/24 dev eth0 proto kernel scope link src 10.0.2.15".to_string());
        }
        Ok("1: lo: <LOOPBACK,UP,LOWER_UP> mtu 65536 state UNKNOWN\n    inet 127.0.0.1/8 scope host lo\n2: eth0: <BROADCAST,MULTICAST,UP,LOWER_UP> mtu 1500 state UP\n    inet 10.0.2.15/24 brd 10.0.2.255 scope global dynamic eth0".to_string())
    }
}

struct ArpCmd;
impl Command for ArpCmd {
    fn name(&self) -> &'static str {
        "arp"
    }
    fn description(&self) -> &'static str {
        "Show the ARP cache (simulated)"
    }
    fn usage(&self) -> &'static str {
        "arp [-a]"
    }
    fn category(&self) -> Category {
        Category::Network
    }
    fn execute(&self, _args: &[&str], _ctx: &mut ShellCtx<'_>) -> Result<String> {
        Ok("Address                  HWtype  HWaddress           Flags Mask            Iface\n10.0.2.2                 ether   52:54:00:12:35:02   C                     eth0\n10.0.2.3                 ether   52:54:00:12:35:03   C                     eth0".to_string())
    }
}

struct RouteCmd;
impl Command for RouteCmd {
    fn name(&self) -> &'static str {
        "route"
    }
    fn description(&self) -> &'static str {
        "Show the routing table (simulated)"
    }
    fn usage(&self) -> &'static str {
        "route [-n]"
    }
    fn category(&self) -> Category {
        Category::Network
    }
    fn execute(&self, _args: &[&str], _ctx: &mut ShellCtx<'_>) -> Result<String> {
        Ok("Kernel IP routing table\nDestination     Gateway         Genmask         Flags Metric Ref    Use Iface\ndefault         10.0.2.2        0.0.0.0         UG    100    0        0 eth0\n10.0.2.0        0.0.0.0         255.255.255.0   U     0      0        0 eth0".to_string())
    }
}

// ---------------------------------------------------------------------------
// Remote access: ssh / scp / telnet / nc
// ---------------------------------------------------------------------------

struct SshCmd;
impl Command for SshCmd {
    fn name(&self) -> &'static str {
        "ssh"
    }
    fn description(&self) -> &'static str {
        "Open a remote shell (simulated, always refused)"
    }
    fn usage(&self) -> &'static str {
        "ssh [user@]host"
    }
    fn category(&self) -> Category {
        Category::Network
    }
    fn execute(&self, args: &[&str], _ctx: &mut ShellCtx<'_>) -> Result<String> {
        let target = first_operand(args, &["-p", "-i"])
            .ok_or_else(|| ShellError::Usage("ssh [user@]host".into()))?;
        let host = target.rsplit('@').next().unwrap_or(target);
        Err(ShellError::Message(format!(
            "ssh: connect to host {host} port 22: Connection refused"
        )))
    }
}

struct ScpCmd;
impl Command for ScpCmd {
    fn name(&self) -> &'static str {
        "scp"
    }
    fn description(&self) -> &'static str {
        "Copy files over SSH (simulated, always refused)"
    }
    fn usage(&self) -> &'static str {
        "scp <src> <dst>"
    }
    fn category(&self) -> Category {
        Category::Network
    }
    fn execute(&self, args: &[&str], _ctx: &mut ShellCtx<'_>) -> Result<String> {
        let operands: Vec<&str> = args
            .iter()
            .copied()
            .filter(|a| !a.is_empty() && !a.starts_with('-'))
            .collect();
        if operands.len() < 2 {
            return Err(ShellError::Usage("scp <src> <dst>".into()));
        }
        let remote = operands
            .iter()
            .copied()
            .find(|o| o.contains(':'))
            .and_then(|o| o.split(':').next())
            .unwrap_or("remote");
        let host = remote.rsplit('@').next().unwrap_or(remote);
        Err(ShellError::Message(format!(
            "ssh: connect to host {host} port 22: Connection refused\nscp: Connection closed"
        )))
    }
}

struct TelnetCmd;
impl Command for TelnetCmd {
    fn name(&self) -> &'static str {
        "telnet"
    }
    fn description(&self) -> &'static str {
        "Connect to a remote port (simulated, always refused)"
    }
    fn usage(&self) -> &'static str {
        "telnet <host> [port]"
    }
    fn category(&self) -> Category {
        Category::Network
    }
    fn execute(&self, args: &[&str], _ctx: &mut ShellCtx<'_>) -> Result<String> {
        let host = first_operand(args, &[])
            .ok_or_else(|| ShellError::Usage("telnet <host> [port]".into()))?;
        Err(ShellError::Message(format!(
            "Trying {}...\ntelnet: Unable to connect to remote host: Connection refused",
            fake_ip(host)
        )))
    }
}

struct NcCmd;
impl Command for NcCmd {
    fn name(&self) -> &'static str {
        "nc"
    }
    fn description(&self) -> &'static str {
        "Netcat (simulated, always refused)"
    }
    fn usage(&self) -> &'static str {
        "nc [-zv] <host> <port>"
    }
    fn category(&self) -> Category {
        Category::Network
    }
    fn execute(&self, args: &[&str], _ctx: &mut ShellCtx<'_>) -> Result<String> {
        let host = first_operand(args, &[])
            .ok_or_else(|| ShellError::Usage("nc [-zv] <host> <port>".into()))?;
        Err(ShellError::Message(format!(
            "nc: connect to {host} ({}) failed: Connection refused",
            fake_ip(host)
        )))
    }
}

/// Register the simulated network stack.
pub fn register_network_commands(set: &mut crate::CommandSet) {
    set.register(Box::new(PingCmd));
    set.register(Box::new(CurlCmd));
    set.register(Box::new(WgetCmd));
    set.register(Box::new(NetstatCmd));
    set.register(Box::new(SsCmd));
    set.register(Box::new(TracerouteCmd));
    set.register(Box::new(NslookupCmd));
    set.register(Box::new(DigCmd));
    set.register(Box::new(HostCmd));
    set.register(Box::new(IfconfigCmd));
    set.register(Box::new(IpCmd));
    set.register(Box::new(ArpCmd));
    set.register(Box::new(RouteCmd));
    set.register(Box::new(SshCmd));
    set.register(Box::new(ScpCmd));
    set.register(Box::new(TelnetCmd));
    set.register(Box::new(NcCmd));
}
