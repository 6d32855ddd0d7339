//! Network producers.

use super::{int_in, pick, random_bytes, BASE};
use crate::registry::RegistryBuilder;
use crate::vocab;
use rand::Rng;
use std::net::{Ipv4Addr, Ipv6Addr};
use synth_core::{GeneratorInfo, Value};

pub fn register(builder: &mut RegistryBuilder) {
    builder
        .register(
            GeneratorInfo::new(BASE, "ipv4", "IPv4 address").example("192.0.2.17"),
            |p| Ok(Value::String(ipv4(p.rand()).to_string())),
        )
        .register(
            GeneratorInfo::new(BASE, "ipv6", "IPv6 address").example("2001:db8::8a2e:370:7334"),
            |p| Ok(Value::String(ipv6(p.rand()).to_string())),
        )
        .register(
            GeneratorInfo::new(BASE, "domain", "Domain name").example("globex.io"),
            |p| Ok(Value::String(domain(p.rand()))),
        )
        .register(
            GeneratorInfo::new(BASE, "url", "HTTPS URL").example("https://www.globex.io/docs"),
            |p| {
                let rng = p.rand();
                let host = domain(rng);
                let path = pick(rng, vocab::URL_PATHS);
                Ok(Value::String(format!("https://www.{host}/{path}")))
            },
        )
        .register(
            GeneratorInfo::new(BASE, "mac", "MAC address").example("3c:22:fb:1a:7e:04"),
            |p| Ok(Value::String(mac(p.rand()))),
        )
        .register(
            GeneratorInfo::new(BASE, "cidr", "IPv4 network in CIDR notation").example("10.24.0.0/16"),
            |p| Ok(Value::String(cidr(p.rand()))),
        )
        .register(
            GeneratorInfo::new(BASE, "inet", "IPv4 host address with netmask").example("10.24.3.9/24"),
            |p| Ok(Value::String(inet(p.rand()))),
        )
        .register(
            GeneratorInfo::new(BASE, "user_agent", "HTTP User-Agent header").example("curl/8.6.0"),
            |p| Ok(Value::from(pick(p.rand(), vocab::USER_AGENTS))),
        );
}

pub fn ipv4<R: Rng + ?Sized>(rng: &mut R) -> Ipv4Addr {
    Ipv4Addr::new(
        int_in(rng, 1, 223) as u8,
        rng.random(),
        rng.random(),
        int_in(rng, 1, 254) as u8,
    )
}

pub fn ipv6<R: Rng + ?Sized>(rng: &mut R) -> Ipv6Addr {
    let mut segments = [0u16; 8];
    segments[0] = 0x2001;
    segments[1] = 0x0db8;
    for segment in segments.iter_mut().skip(2) {
        *segment = rng.random();
    }
    Ipv6Addr::from(segments)
}

pub fn domain<R: Rng + ?Sized>(rng: &mut R) -> String {
    let word = pick(rng, vocab::COMPANY_WORDS).to_lowercase().replace(' ', "");
    format!("{word}.{}", pick(rng, vocab::TLDS))
}

pub fn mac<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut bytes = random_bytes(rng, 6);
    // Locally administered unicast
    bytes[0] = (bytes[0] | 0x02) & 0xfe;
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(":")
}

/// Network address with a prefix length in `[8, 30]`.
pub fn cidr<R: Rng + ?Sized>(rng: &mut R) -> String {
    let prefix = int_in(rng, 8, 30) as u32;
    let mask = u32::MAX << (32 - prefix);
    let network = Ipv4Addr::from(u32::from(ipv4(rng)) & mask);
    format!("{network}/{prefix}")
}

/// Host address with a common netmask.
pub fn inet<R: Rng + ?Sized>(rng: &mut R) -> String {
    let prefix = pick(rng, &["8", "16", "24", "32"]);
    format!("{}/{prefix}", ipv4(rng))
}
