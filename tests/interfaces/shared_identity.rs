use dyn_link::{ Library, PluginRegistration, PluginRegistry };

use crate::dummy::{ self, NameGetter };

/// A second, unrelated "library" whose registry declares the same canonical
/// interface name as the dummy fixture.
#[derive( Default )]
struct OtherNamePlugin ;

impl NameGetter for OtherNamePlugin {
	fn name( &self ) -> String {
		"OtherNamePlugin".to_string()
	}
}

fn other_library() -> Library {
	Library::from_registry( PluginRegistry::from_iter([
		PluginRegistration::of( "other::OtherNamePlugin", OtherNamePlugin::default )
			.implements::<dyn NameGetter>(| plugin | plugin )
			.finish(),
	]))
}

/// Identifier canonicalization is trusted across libraries: the same canonical
/// name loaded from two simultaneously live libraries resolves as the same
/// interface through one `dyn` type.
#[test]
fn same_canonical_name_across_libraries_is_the_same_interface() {

	let dummy_plugin = dummy::library().instantiate( dummy::SINGLE_PLUGIN ).unwrap();
	let other_plugin = other_library().instantiate( "other::OtherNamePlugin" ).unwrap();

	let from_dummy = dummy_plugin.interface::<dyn NameGetter>().unwrap();
	let from_other = other_plugin.interface::<dyn NameGetter>().unwrap();

	assert_eq!( from_dummy.name(), "DummySinglePlugin" );
	assert_eq!( from_other.name(), "OtherNamePlugin" );

	// Both resolve under the identical canonical key.
	assert!( dummy_plugin.implements_name( "dummy::NameGetter" ));
	assert!( other_plugin.implements_name( "dummy::NameGetter" ));

}
