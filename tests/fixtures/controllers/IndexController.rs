// Marker source for IndexController, located by the controller loader.
