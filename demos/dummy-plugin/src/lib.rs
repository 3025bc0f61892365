//! Demo plugin library.
//!
//! Builds as a `cdylib` and exports two plugin classes through
//! [`export_registry!`]. A host resolves this module with
//! [`dyn_link::LibraryDirectory`], loads it with [`dyn_link::Library::load`],
//! and instantiates the classes by name.
//!
//! The interface traits are declared here for brevity; in a real deployment
//! they live in a crate shared between the host and every plugin, so both
//! sides agree on the trait definitions and canonical names.

use std::sync::atomic::{ AtomicI64, AtomicU64, Ordering } ;

use dyn_link::{ export_registry, interface, PluginRegistration, PluginRegistry } ;



pub trait Setter { fn set( &self, value: f64 ) ; }
pub trait DoubleGetter { fn get( &self ) -> f64 ; }
pub trait IntGetter { fn get_int( &self ) -> i64 ; }
pub trait NameGetter { fn name( &self ) -> &str ; }

interface!( dyn Setter, "dummy::Setter" );
interface!( dyn DoubleGetter, "dummy::DoubleGetter" );
interface!( dyn IntGetter, "dummy::IntGetter" );
interface!( dyn NameGetter, "dummy::NameGetter" );

/// Implements three of the four interfaces. Interior mutability keeps the
/// interface methods `&self`, matching how views hand out shared references.
struct DummyMultiPlugin {
	double_bits: AtomicU64,
	int_value: AtomicI64,
}

impl Default for DummyMultiPlugin {
	fn default() -> Self {
		Self {
			double_bits: AtomicU64::new( 3.14159_f64.to_bits() ),
			int_value: AtomicI64::new( 42 ),
		}
	}
}

impl Setter for DummyMultiPlugin {
	fn set( &self, value: f64 ) {
		self.double_bits.store( value.to_bits(), Ordering::Relaxed );
	}
}

impl DoubleGetter for DummyMultiPlugin {
	fn get( &self ) -> f64 {
		f64::from_bits( self.double_bits.load( Ordering::Relaxed ))
	}
}

impl IntGetter for DummyMultiPlugin {
	fn get_int( &self ) -> i64 {
		self.int_value.load( Ordering::Relaxed )
	}
}

/// Implements a single interface, demonstrating that absence of the others is
/// observable but harmless on the host side.
#[derive( Default )]
struct DummySinglePlugin ;

impl NameGetter for DummySinglePlugin {
	fn name( &self ) -> &str {
		"DummySinglePlugin"
	}
}

fn registry() -> PluginRegistry {
	PluginRegistry::from_iter([
		PluginRegistration::of( "dummy::DummyMultiPlugin", DummyMultiPlugin::default )
			.implements::<dyn Setter>(| plugin | plugin )
			.implements::<dyn DoubleGetter>(| plugin | plugin )
			.implements::<dyn IntGetter>(| plugin | plugin )
			.finish(),
		PluginRegistration::of( "dummy::DummySinglePlugin", DummySinglePlugin::default )
			.implements::<dyn NameGetter>(| plugin | plugin )
			.finish(),
	])
}

export_registry!( registry() );
