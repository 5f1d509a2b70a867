//! Operator forwarding shared by `BigInteger` and `Rational`.
//!
//! Each type implements `OpAssign<&Self>` by hand; these macros derive the
//! owned/borrowed binary operator matrix from it.

macro_rules! forward_binop {
    ($ty:ident, $imp:ident, $method:ident, $assign_imp:ident, $assign_method:ident) => {
        impl ::std::ops::$assign_imp<$ty> for $ty {
            #[inline]
            fn $assign_method(&mut self, rhs: $ty) {
                ::std::ops::$assign_imp::$assign_method(self, &rhs);
            }
        }

        impl ::std::ops::$imp<&$ty> for &$ty {
            type Output = $ty;

            #[inline]
            fn $method(self, rhs: &$ty) -> $ty {
                let mut out = self.clone();
                ::std::ops::$assign_imp::$assign_method(&mut out, rhs);
                out
            }
        }

        impl ::std::ops::$imp<$ty> for &$ty {
            type Output = $ty;

            #[inline]
            fn $method(self, rhs: $ty) -> $ty {
                let mut out = self.clone();
                ::std::ops::$assign_imp::$assign_method(&mut out, &rhs);
                out
            }
        }

        impl ::std::ops::$imp<&$ty> for $ty {
            type Output = $ty;

            #[inline]
            fn $method(mut self, rhs: &$ty) -> $ty {
                ::std::ops::$assign_imp::$assign_method(&mut self, rhs);
                self
            }
        }

        impl ::std::ops::$imp<$ty> for $ty {
            type Output = $ty;

            #[inline]
            fn $method(mut self, rhs: $ty) -> $ty {
                ::std::ops::$assign_imp::$assign_method(&mut self, &rhs);
                self
            }
        }
    };
}

macro_rules! forward_all_binops {
    ($ty:ident) => {
        forward_binop!($ty, Add, add, AddAssign, add_assign);
        forward_binop!($ty, Sub, sub, SubAssign, sub_assign);
        forward_binop!($ty, Mul, mul, MulAssign, mul_assign);
        forward_binop!($ty, Div, div, DivAssign, div_assign);
    };
}

/// Serialize through `Display` and deserialize through `FromStr`.
macro_rules! serde_via_string {
    ($ty:ident) => {
        impl ::serde::Serialize for $ty {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $ty {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let text = <::std::borrow::Cow<'de, str> as ::serde::Deserialize>::deserialize(
                    deserializer,
                )?;
                text.parse().map_err(::serde::de::Error::custom)
            }
        }
    };
}
