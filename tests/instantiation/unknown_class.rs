use dyn_link::InstantiationError ;

use crate::dummy ;

#[test]
fn unknown_class_fails_and_leaves_the_library_reusable() {

	let library = dummy::library();

	match library.instantiate( "dummy::NoSuchPlugin" ) {
		Err( InstantiationError::PluginClassNotFound { class, available }) => {
			assert_eq!( class, "dummy::NoSuchPlugin" );
			assert!( available.contains( dummy::MULTI_PLUGIN ));
		}
		outcome => panic!( "Expected PluginClassNotFound, found: {:?}", outcome ),
	}

	// No partial side effects: the same handle still instantiates other classes.
	let plugin = library.instantiate( dummy::MULTI_PLUGIN ).unwrap();
	assert_eq!( plugin.class_name(), dummy::MULTI_PLUGIN );

}

#[test]
fn class_name_match_is_exact() {

	let library = dummy::library();
	// Case or partial matches must not resolve.
	assert!( library.instantiate( "dummy::dummymultiplugin" ).is_err() );
	assert!( library.instantiate( "DummyMultiPlugin" ).is_err() );

}
