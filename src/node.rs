//! Node identifier and its sources.

use std::{fmt, str};

use crate::{generator::RandSource, Error};

/// A 48-bit node identifier, ideally the hardware address of a network interface.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct NodeId([u8; 6]);

impl NodeId {
    /// Creates a node identifier from its bytes.
    pub const fn from_bytes(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 6] {
        &self.0
    }

    /// Creates a random node identifier with the multicast bit set, so that it cannot collide
    /// with a real IEEE 802 hardware address.
    pub fn random<R: RandSource>(rng: &mut R) -> Result<Self, Error> {
        let mut bytes = [0u8; 6];
        rng.try_fill_bytes(&mut bytes)?;
        bytes[0] |= 0x01;
        Ok(Self(bytes))
    }
}

impl fmt::Display for NodeId {
    /// Returns the colon-separated lowercase hexadecimal representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = &self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            b[0], b[1], b[2], b[3], b[4], b[5]
        )
    }
}

impl str::FromStr for NodeId {
    type Err = crate::ParseError;

    /// Creates an object from the `xx:xx:xx:xx:xx:xx` hexadecimal representation.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        const ERR: crate::ParseError = crate::ParseError {};
        let mut dst = [0u8; 6];
        let mut parts = src.split(':');
        for e in dst.iter_mut() {
            let part = parts.next().ok_or(ERR)?;
            if part.len() != 2 || !part.bytes().all(|c| c.is_ascii_hexdigit()) {
                return Err(ERR);
            }
            *e = u8::from_str_radix(part, 16).map_err(|_| ERR)?;
        }
        if parts.next().is_none() {
            Ok(Self(dst))
        } else {
            Err(ERR)
        }
    }
}

impl From<[u8; 6]> for NodeId {
    fn from(src: [u8; 6]) -> Self {
        Self(src)
    }
}

impl From<NodeId> for [u8; 6] {
    fn from(src: NodeId) -> Self {
        src.0
    }
}

/// A source of the node identifier used when a generator starts without prior state.
pub trait NodeSource {
    /// Returns a node identifier, or [`Error::NodeUnavailable`] if none can be found.
    fn node_id(&mut self) -> Result<NodeId, Error>;
}

/// The default [`NodeSource`] that picks the hardware address of the first network interface that
/// is up and is not a loopback interface.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct InterfaceNode;

impl NodeSource for InterfaceNode {
    #[cfg(any(
        target_os = "linux",
        target_os = "android",
        target_os = "macos",
        target_os = "ios",
        target_os = "freebsd",
        target_os = "dragonfly",
        target_os = "netbsd",
        target_os = "openbsd"
    ))]
    fn node_id(&mut self) -> Result<NodeId, Error> {
        let interfaces = nix::ifaddrs::getifaddrs()
            .map_err(|err| Error::NodeUnavailable(format!("could not list interfaces: {}", err)))?;
        for iface in interfaces {
            let link = iface.address.as_ref().and_then(|e| e.as_link_addr());
            if let Some(addr) = hardware_address(iface.flags, link) {
                log::debug!("using hardware address of {}", iface.interface_name);
                return Ok(NodeId(addr));
            }
        }
        Err(Error::NodeUnavailable(
            "no interface that is up and not loopback has a hardware address".to_owned(),
        ))
    }

    #[cfg(not(any(
        target_os = "linux",
        target_os = "android",
        target_os = "macos",
        target_os = "ios",
        target_os = "freebsd",
        target_os = "dragonfly",
        target_os = "netbsd",
        target_os = "openbsd"
    )))]
    fn node_id(&mut self) -> Result<NodeId, Error> {
        Err(Error::NodeUnavailable(
            "interface enumeration is not supported on this platform".to_owned(),
        ))
    }
}

/// Returns the 6-byte hardware address of an interface that is up and is not a loopback
/// interface. Link addresses of any other length (tunnels, InfiniBand) are skipped.
#[cfg(any(
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "dragonfly",
    target_os = "netbsd",
    target_os = "openbsd"
))]
fn hardware_address(
    flags: nix::net::if_::InterfaceFlags,
    link: Option<&nix::sys::socket::LinkAddr>,
) -> Option<[u8; 6]> {
    use nix::net::if_::InterfaceFlags;

    if !flags.contains(InterfaceFlags::IFF_UP) || flags.contains(InterfaceFlags::IFF_LOOPBACK) {
        return None;
    }
    let link = link?;
    #[cfg(any(target_os = "linux", target_os = "android"))]
    let len = link.halen();
    #[cfg(not(any(target_os = "linux", target_os = "android")))]
    let len = link.alen();
    if len != 6 {
        return None;
    }
    link.addr().filter(|addr| addr != &[0; 6])
}

/// A [`NodeSource`] that always returns the same identifier.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct StaticNode(/** The identifier returned. */ pub NodeId);

impl NodeSource for StaticNode {
    fn node_id(&mut self) -> Result<NodeId, Error> {
        Ok(self.0)
    }
}

mod serde_support {
    use super::{fmt, NodeId};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for NodeId {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.collect_str(self)
            } else {
                serializer.serialize_bytes(self.as_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for NodeId {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = NodeId;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a 48-bit node identifier")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            <[u8; 6]>::try_from(value)
                .map(Self::Value::from)
                .map_err(de::Error::custom)
        }
    }
}
