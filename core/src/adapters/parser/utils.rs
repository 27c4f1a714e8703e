pub struct Utils;

impl Utils {
    /// Split an `address:port` token into its address and port.
    ///
    /// The port is whatever follows the last `:`, which covers every
    /// format the backends emit:
    /// - IPv4: "127.0.0.1:3000" or "*:8080"
    /// - IPv6: "\[::1]:3000" or "\[::ffff:127.0.0.1]:63342"
    /// - netstat IPv6: ":::3000"
    pub fn parse_address(address: &str) -> Option<(String, u16)> {
        let last_colon = address.rfind(':')?;
        let port: u16 = address[last_colon + 1..].parse().ok()?;
        if port == 0 {
            return None;
        }

        let addr = &address[..last_colon];
        let addr = if addr.is_empty() { "*" } else { addr };
        Some((addr.to_string(), port))
    }

    /// Unescape the hex sequences lsof uses for unprintable name bytes.
    pub fn unescape_name(name: &str) -> String {
        name.replace("\\x20", " ").replace("\\x2f", "/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ipv4_address() {
        let (addr, port) = Utils::parse_address("127.0.0.1:3000").unwrap();
        assert_eq!(addr, "127.0.0.1");
        assert_eq!(port, 3000);

        let (addr, port) = Utils::parse_address("*:8080").unwrap();
        assert_eq!(addr, "*");
        assert_eq!(port, 8080);
    }

    #[test]
    fn test_parse_ipv6_address() {
        let (addr, port) = Utils::parse_address("[::1]:3000").unwrap();
        assert_eq!(addr, "[::1]");
        assert_eq!(port, 3000);

        let (addr, port) = Utils::parse_address("[::ffff:127.0.0.1]:63342").unwrap();
        assert_eq!(addr, "[::ffff:127.0.0.1]");
        assert_eq!(port, 63342);

        let (addr, port) = Utils::parse_address(":::8080").unwrap();
        assert_eq!(addr, "::");
        assert_eq!(port, 8080);
    }

    #[test]
    fn test_reject_bad_ports() {
        assert!(Utils::parse_address("127.0.0.1:http").is_none());
        assert!(Utils::parse_address("*:*").is_none());
        assert!(Utils::parse_address("0.0.0.0:99999").is_none());
        assert!(Utils::parse_address("no-colon").is_none());
        assert!(Utils::parse_address("*:0").is_none());
    }

    #[test]
    fn test_names() {
        assert_eq!(Utils::unescape_name("Code\\x20Helper"), "Code Helper");
    }
}
