//! Blank keys and values.
//!
//! The containers refuse to store a key or value that carries no
//! information: an empty string or a `None`. Types with no blank state
//! opt in with an empty impl:
//!
//! ```rust
//! use chained_hash::Blank;
//!
//! #[derive(PartialEq, Eq, Hash)]
//! struct CountryCode(u16);
//!
//! impl Blank for CountryCode {}
//! ```

use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, SocketAddrV4, SocketAddrV6};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;

/// A key or value that may be blank.
pub trait Blank {
    /// Returns `true` if the value must not be stored.
    fn is_blank(&self) -> bool {
        false
    }
}

impl Blank for str {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl Blank for String {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T: ?Sized + Blank> Blank for &T {
    fn is_blank(&self) -> bool {
        (**self).is_blank()
    }
}

impl<T: ?Sized + Blank> Blank for Box<T> {
    fn is_blank(&self) -> bool {
        (**self).is_blank()
    }
}

impl<T: ?Sized + Blank> Blank for Rc<T> {
    fn is_blank(&self) -> bool {
        (**self).is_blank()
    }
}

impl<T: ?Sized + Blank> Blank for Arc<T> {
    fn is_blank(&self) -> bool {
        (**self).is_blank()
    }
}

impl Blank for Cow<'_, str> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Blank for Option<T> {
    fn is_blank(&self) -> bool {
        self.is_none()
    }
}

macro_rules! never_blank {
    ($($t:ty),* $(,)?) => {
        $(impl Blank for $t {})*
    };
}

never_blank!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, char, bool, (),
);

// Paths and OS strings are identifiers, not text: an empty one is still a
// value.
never_blank!(Path, PathBuf, OsStr, OsString);
never_blank!(IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, SocketAddrV4, SocketAddrV6);

// Sequences are never blank, empty or not.
impl<T> Blank for [T] {}
impl<T, const N: usize> Blank for [T; N] {}
impl<T> Blank for Vec<T> {}

macro_rules! never_blank_tuple {
    ($($name:ident)+) => {
        impl<$($name),+> Blank for ($($name,)+) {}
    };
}

never_blank_tuple!(A);
never_blank_tuple!(A B);
never_blank_tuple!(A B C);
never_blank_tuple!(A B C D);
never_blank_tuple!(A B C D E);
never_blank_tuple!(A B C D E F);
never_blank_tuple!(A B C D E F G);
never_blank_tuple!(A B C D E F G H);
never_blank_tuple!(A B C D E F G H I);
never_blank_tuple!(A B C D E F G H I J);
never_blank_tuple!(A B C D E F G H I J K);
never_blank_tuple!(A B C D E F G H I J K L);
