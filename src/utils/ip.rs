//! 访客 IP 提取
//!
//! 连接来自私有地址或本机时视为经过反向代理，读取转发头；
//! 公网直连时只使用连接地址，转发头可被伪造。

use std::net::IpAddr;

use actix_web::HttpRequest;
use actix_web::http::header::HeaderMap;

/// 私有地址或 localhost
pub fn is_private_or_local(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => v4.is_private() || v4.is_loopback(),
        IpAddr::V6(v6) => {
            v6.is_loopback()
                || (v6.segments()[0] & 0xfe00) == 0xfc00 // fc00::/7
                || (v6.segments()[0] & 0xffc0) == 0xfe80 // fe80::/10
        }
    }
}

/// 访客 IP；无法确定时返回 `None`
pub fn extract_client_ip(req: &HttpRequest) -> Option<String> {
    let peer = req.peer_addr().map(|addr| addr.ip());

    match peer {
        Some(ip) if !is_private_or_local(&ip) => Some(ip.to_string()),
        Some(ip) => forwarded_ip(req.headers()).or_else(|| Some(ip.to_string())),
        None => forwarded_ip(req.headers()),
    }
}

/// X-Forwarded-For 的第一项，其次 X-Real-IP
pub fn forwarded_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|h| h.to_str().ok())
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_is_private_or_local() {
        assert!(is_private_or_local(&"10.0.0.1".parse().unwrap()));
        assert!(is_private_or_local(&"127.0.0.1".parse().unwrap()));
        assert!(is_private_or_local(&"fd00::1".parse().unwrap()));
        assert!(!is_private_or_local(&"8.8.8.8".parse().unwrap()));
        assert!(!is_private_or_local(&"2001:4860:4860::8888".parse().unwrap()));
    }

    #[test]
    fn test_proxy_peer_uses_forwarded_for() {
        let req = TestRequest::default()
            .peer_addr("127.0.0.1:40000".parse().unwrap())
            .insert_header(("x-forwarded-for", "203.0.113.7, 10.0.0.2"))
            .to_http_request();
        assert_eq!(extract_client_ip(&req).as_deref(), Some("203.0.113.7"));
    }

    #[test]
    fn test_public_peer_ignores_forwarded_for() {
        let req = TestRequest::default()
            .peer_addr("198.51.100.4:5555".parse().unwrap())
            .insert_header(("x-forwarded-for", "1.2.3.4"))
            .to_http_request();
        assert_eq!(extract_client_ip(&req).as_deref(), Some("198.51.100.4"));
    }

    #[test]
    fn test_real_ip_fallback() {
        let req = TestRequest::default()
            .peer_addr("192.168.1.10:5555".parse().unwrap())
            .insert_header(("x-real-ip", "203.0.113.9"))
            .to_http_request();
        assert_eq!(extract_client_ip(&req).as_deref(), Some("203.0.113.9"));

        let req = TestRequest::default()
            .peer_addr("192.168.1.10:5555".parse().unwrap())
            .to_http_request();
        assert_eq!(extract_client_ip(&req).as_deref(), Some("192.168.1.10"));
    }
}
