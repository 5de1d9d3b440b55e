// Marker source for admin::OtherController, located by the controller loader.
